use fieldmap::Reflect;

#[derive(Reflect)]
struct Wrapper<T> {
    value: T,
}

fn main() {}
