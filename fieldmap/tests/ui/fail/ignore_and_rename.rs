use fieldmap::Reflect;

#[derive(Reflect)]
struct Account {
    #[fieldmap(ignore, rename = "alias")]
    secret: String,
}

fn main() {}
