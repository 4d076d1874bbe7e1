// example/src/main.rs

mod generated;

// Generated string fields deserialize through `crate::cow_de`.
pub use tl_serde_gen::cow_de;

use generated::dynamic::{Function, Object, Shape};
use generated::functions::{GetDrawing, HasDrawing};
use generated::types::{Drawing, ShapeCircle};

const DRAWING_JSON: &str = r#"{
    "@type": "drawing",
    "title": "Two shapes",
    "shapes": [
        { "@type": "shapeCircle", "radius": 1.5 },
        { "@type": "shapeSquare", "side": 2.0 },
        { "@type": "shapeGroup", "shapes": [{ "@type": "shapeEmpty" }] }
    ],
    "thumbnail": "png",
    "parent": { "@type": "drawing", "title": "Draft", "shapes": [] }
}"#;

fn describe(shape: &Shape) -> String {
    match shape {
        Shape::Circle(c) => format!("circle (r={})", c.radius),
        Shape::Square(s) => format!("square (side={})", s.side),
        Shape::Group(g) => format!("group of {}", g.shapes.iter().flatten().count()),
        Shape::Empty(_) => "empty".to_string(),
    }
}

fn main() -> Result<(), serde_json::Error> {
    // Any constructor can be read through `Object`, dispatched on "@type".
    let object: Object = serde_json::from_str(DRAWING_JSON)?;

    let drawing: Drawing = match object {
        Object::Drawing(drawing) => drawing,
        other => {
            println!("unexpected object: {:?}", other);
            return Ok(());
        }
    };

    println!("title = {}", drawing.title.as_deref().unwrap_or_default());
    for (i, shape) in drawing.shapes.iter().flatten().enumerate() {
        println!("  shape[{}] = {}", i, describe(shape));
    }
    if let Some(parent) = &drawing.parent {
        println!("copied from = {}", parent.title.as_deref().unwrap_or_default());
    }

    // Narrow an `Object` down to the `Shape` union and widen it back.
    let object = Object::from(ShapeCircle { radius: 3.0 });
    let shape = Shape::try_from(object).map_err(|o| {
        <serde_json::Error as serde::de::Error>::custom(format!("not a shape: {:?}", o))
    })?;
    let object: Object = shape.into();
    println!("round trip = {}", serde_json::to_string(&object)?);

    // Requests go out as the `Function` union.
    let request = Function::from(GetDrawing { id: 7 });
    println!("request = {}", serde_json::to_string(&request)?);
    let request = Function::from(HasDrawing { id: 7 });
    println!("request = {}", serde_json::to_string(&request)?);

    Ok(())
}
