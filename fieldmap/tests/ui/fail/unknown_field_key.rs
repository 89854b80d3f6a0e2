use fieldmap::Reflect;

#[derive(Reflect)]
struct Account {
    #[fieldmap(skip)]
    id: i64,
}

fn main() {}
