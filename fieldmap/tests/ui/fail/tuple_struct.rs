use fieldmap::Reflect;

#[derive(Reflect)]
struct Pair(i32, i32);

fn main() {}
