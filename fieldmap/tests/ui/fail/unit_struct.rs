use fieldmap::Reflect;

#[derive(Reflect)]
struct Marker;

fn main() {}
