//! Auto-generated JSON messages
// Auto-generated, do not edit
#![allow(unused_imports, unreachable_patterns)]
use serde::{Serialize, Deserialize};
use std::{borrow::Cow, convert::TryFrom};
/// Enums containing type markers and subclasses
pub mod dynamic {
	use super::{*, types::*, functions::*};
	#[derive(Serialize, Deserialize, Clone, Debug)]
	#[serde(tag="@type")]
	pub enum Shape {
		#[serde(rename="shapeCircle")]
		Circle(ShapeCircle),
		#[serde(rename="shapeSquare")]
		Square(ShapeSquare),
		#[serde(rename="shapeGroup")]
		Group(ShapeGroup),
		#[serde(rename="shapeEmpty")]
		Empty(ShapeEmpty),
	}
	impl From<ShapeCircle> for Shape { fn from(v: ShapeCircle) -> Self { Self::Circle(v) }}
	impl From<ShapeSquare> for Shape { fn from(v: ShapeSquare) -> Self { Self::Square(v) }}
	impl From<ShapeGroup> for Shape { fn from(v: ShapeGroup) -> Self { Self::Group(v) }}
	impl From<ShapeEmpty> for Shape { fn from(v: ShapeEmpty) -> Self { Self::Empty(v) }}
	impl<'a> TryFrom<Object<'a>> for Shape {
		type Error = Object<'a>;
		fn try_from(v: Object<'a>) -> Result<Self, Object<'a>> {
			match v {
				Object::ShapeCircle(v) => Result::Ok(Self::Circle(v)),
				Object::ShapeSquare(v) => Result::Ok(Self::Square(v)),
				Object::ShapeGroup(v) => Result::Ok(Self::Group(v)),
				Object::ShapeEmpty(v) => Result::Ok(Self::Empty(v)),
				v => Result::Err(v),
			}
		}
	}
	impl<'a> From<Shape> for Object<'a> {
		fn from(v: Shape) -> Object<'a> {
			match v {
				Shape::Circle(v) => Object::ShapeCircle(v),
				Shape::Square(v) => Object::ShapeSquare(v),
				Shape::Group(v) => Object::ShapeGroup(v),
				Shape::Empty(v) => Object::ShapeEmpty(v),
			}
		}
	}

	#[derive(Serialize, Deserialize, Clone, Debug)]
	#[serde(tag="@type")]
	pub enum Object<'a> {
		#[serde(rename="shapeCircle")]
		ShapeCircle(ShapeCircle),
		#[serde(rename="shapeSquare")]
		ShapeSquare(ShapeSquare),
		#[serde(rename="shapeGroup")]
		ShapeGroup(ShapeGroup),
		#[serde(rename="shapeEmpty")]
		ShapeEmpty(ShapeEmpty),
		#[serde(rename="drawing")]
		Drawing(#[serde(borrow)]Drawing<'a>),
	}
	impl<'a> From<ShapeCircle> for Object<'a> { fn from(v: ShapeCircle) -> Self { Self::ShapeCircle(v) }}
	impl<'a> From<ShapeSquare> for Object<'a> { fn from(v: ShapeSquare) -> Self { Self::ShapeSquare(v) }}
	impl<'a> From<ShapeGroup> for Object<'a> { fn from(v: ShapeGroup) -> Self { Self::ShapeGroup(v) }}
	impl<'a> From<ShapeEmpty> for Object<'a> { fn from(v: ShapeEmpty) -> Self { Self::ShapeEmpty(v) }}
	impl<'a> From<Drawing<'a>> for Object<'a> { fn from(v: Drawing<'a>) -> Self { Self::Drawing(v) }}

	#[derive(Serialize, Deserialize, Clone, Debug)]
	#[serde(tag="@type")]
	pub enum Function {
		#[serde(rename="getDrawing")]
		GetDrawing(GetDrawing),
		#[serde(rename="hasDrawing")]
		HasDrawing(HasDrawing),
	}
	impl From<GetDrawing> for Function { fn from(v: GetDrawing) -> Self { Self::GetDrawing(v) }}
	impl From<HasDrawing> for Function { fn from(v: HasDrawing) -> Self { Self::HasDrawing(v) }}

}

/// API Types
pub mod types {
	use super::{*, dynamic::*};
	/// Super type: Shape
	#[derive(Serialize, Deserialize, Clone, Debug)]
	pub struct ShapeCircle {
		pub radius: f64,
	}

	/// Super type: Shape
	#[derive(Serialize, Deserialize, Clone, Debug)]
	pub struct ShapeSquare {
		pub side: f64,
	}

	/// Super type: Shape
	#[derive(Serialize, Deserialize, Clone, Debug)]
	pub struct ShapeGroup {
		pub shapes: Vec<Option<Box<Shape>>>,
	}

	/// Super type: Shape
	#[derive(Serialize, Deserialize, Clone, Debug)]
	pub struct ShapeEmpty;

	/// Super type: Drawing
	#[derive(Serialize, Deserialize, Clone, Debug)]
	pub struct Drawing<'a> {
		#[serde(borrow, deserialize_with="crate::cow_de::de_opt_cow_str")]
		pub title: Option<Cow<'a, str>>,
		pub shapes: Vec<Option<Shape>>,
		#[serde(borrow)]
		pub thumbnail: Option<&'a [u8]>,
		#[serde(borrow)]
		pub parent: Option<Box<Drawing<'a>>>,
	}

}

/// API functions
pub mod functions {
	use super::{*, dynamic::*, types::*};
	#[derive(Serialize, Deserialize, Clone, Debug)]
	pub struct GetDrawing {
		pub id: i32,
	}

	#[derive(Serialize, Deserialize, Clone, Debug)]
	pub struct HasDrawing {
		pub id: i32,
	}

}
