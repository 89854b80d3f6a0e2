use fieldmap::Reflect;

#[derive(Reflect)]
#[fieldmap(flatten)]
struct Account {
    id: i64,
}

fn main() {}
