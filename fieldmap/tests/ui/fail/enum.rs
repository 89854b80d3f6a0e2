use fieldmap::Reflect;

#[derive(Reflect)]
enum Shape {
    Circle,
    Square,
}

fn main() {}
