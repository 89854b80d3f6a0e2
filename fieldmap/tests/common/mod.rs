//! Shared fixtures for mapper tests.

#![allow(dead_code)]

use std::any::Any;
use std::io;
use std::sync::{Arc, Mutex};

use fieldmap::{
    AccessError, AccessResult, FieldDescriptor, FieldKind, ObjectRef, Reflect, downcast_source,
};

/// Two fields registered by hand: `field1: i32`, `field2: String`.
pub struct TestInner {
    pub field1: i32,
    pub field2: String,
}

impl TestInner {
    pub fn new(field1: i32, field2: &str) -> Self {
        Self {
            field1,
            field2: field2.to_string(),
        }
    }
}

fn read_field1(source: &dyn Any) -> AccessResult<Option<ObjectRef<'_>>> {
    let inner = downcast_source::<TestInner>(source)?;
    Ok(Some(ObjectRef::new(&inner.field1)))
}

fn read_field2(source: &dyn Any) -> AccessResult<Option<ObjectRef<'_>>> {
    let inner = downcast_source::<TestInner>(source)?;
    Ok(Some(ObjectRef::new(&inner.field2)))
}

impl Reflect for TestInner {
    fn fields(&self) -> &'static [FieldDescriptor] {
        static FIELDS: &[FieldDescriptor] = &[
            FieldDescriptor::new("field1", FieldKind::I32, read_field1),
            FieldDescriptor::object("field2", read_field2),
        ];
        FIELDS
    }
}

/// `field2` is computed and fails to read; `field1` and `field3` are fine.
pub struct Flaky {
    pub field1: i32,
    pub field3: bool,
}

fn read_flaky_field1(source: &dyn Any) -> AccessResult<Option<ObjectRef<'_>>> {
    let flaky = downcast_source::<Flaky>(source)?;
    Ok(Some(ObjectRef::new(&flaky.field1)))
}

fn read_flaky_field2(_source: &dyn Any) -> AccessResult<Option<ObjectRef<'_>>> {
    Err(AccessError::Unavailable {
        field: "field2",
        reason: "not computed".to_string(),
    })
}

fn read_flaky_field3(source: &dyn Any) -> AccessResult<Option<ObjectRef<'_>>> {
    let flaky = downcast_source::<Flaky>(source)?;
    Ok(Some(ObjectRef::new(&flaky.field3)))
}

impl Reflect for Flaky {
    fn fields(&self) -> &'static [FieldDescriptor] {
        static FIELDS: &[FieldDescriptor] = &[
            FieldDescriptor::new("field1", FieldKind::I32, read_flaky_field1),
            FieldDescriptor::object("field2", read_flaky_field2),
            FieldDescriptor::new("field3", FieldKind::Bool, read_flaky_field3),
        ];
        FIELDS
    }
}

/// `count` holds an `i32` but is registered as `I64`.
pub struct Mislabelled {
    pub count: i32,
}

fn read_count(source: &dyn Any) -> AccessResult<Option<ObjectRef<'_>>> {
    let mislabelled = downcast_source::<Mislabelled>(source)?;
    Ok(Some(ObjectRef::new(&mislabelled.count)))
}

impl Reflect for Mislabelled {
    fn fields(&self) -> &'static [FieldDescriptor] {
        static FIELDS: &[FieldDescriptor] =
            &[FieldDescriptor::new("count", FieldKind::I64, read_count)];
        FIELDS
    }
}

/// Reuses `TestInner`'s accessors, so every read sees the wrong source type.
pub struct Borrowed {
    pub field1: i32,
}

impl Reflect for Borrowed {
    fn fields(&self) -> &'static [FieldDescriptor] {
        static FIELDS: &[FieldDescriptor] = &[
            FieldDescriptor::new("field1", FieldKind::I32, read_field1),
            FieldDescriptor::object("field2", read_field2),
        ];
        FIELDS
    }
}

/// In-memory sink for `tracing` output.
#[derive(Clone, Default)]
pub struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Run `f` with a subscriber that records every event, returning its output.
pub fn capture_logs<R>(f: impl FnOnce() -> R) -> (R, String) {
    let buffer = LogBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::TRACE)
        .finish();

    let result = tracing::subscriber::with_default(subscriber, f);
    (result, buffer.contents())
}
