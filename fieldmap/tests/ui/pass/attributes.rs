use fieldmap::{FieldMap, Mappable, Reflect, Value};

type Score = u16;

#[derive(Reflect)]
struct Account {
    id: i64,
    #[fieldmap(rename = "displayName")]
    display_name: String,
    #[fieldmap(ignore)]
    password_hash: String,
    score: Score,
    r#type: Option<String>,
}

#[derive(Reflect)]
#[fieldmap(mappable)]
struct Summary {
    total: u32,
}

impl Mappable for Summary {
    fn to_map(&self) -> FieldMap<'_> {
        let mut map = FieldMap::new();
        map.insert("total".to_string(), Value::U32(self.total));
        map
    }
}

#[derive(Reflect)]
struct Empty {}

fn main() {
    let account = Account {
        id: 1,
        display_name: "ada".into(),
        password_hash: String::new(),
        score: 3,
        r#type: None,
    };
    let _ = fieldmap::to_map(Some(&account));
    let _ = fieldmap::to_map(Some(&Summary { total: 2 })).map(|map| map.len());
    let _ = Empty {}.fields().len();
}
