//! Structural inference over JSON samples.
//!
//! Every JSON position is observed into a [`Shape`] (sufficient statistics,
//! no history), and sibling observations are merged with [`join`]:
//! array elements with each other, objects key by key, separate documents
//! with each other. The join is associative, so it does not matter how
//! samples are grouped, and re-observing a sample never changes the inferred
//! kinds. It is commutative up to field order, which follows first sight.
//!
//! Inference is total: any parsed value has a shape, and evidence that does
//! not agree degrades to [`Shape::Mixed`] instead of failing.
pub mod num;
pub mod obj;
pub mod str;

use serde_json::{Map, Value};

pub use num::NumC;
pub use obj::{FieldC, ObjC};
pub use str::StrC;

// ------------------------------ State ------------------------------------ //

#[derive(Clone, Debug, Default, PartialEq)]
pub enum Shape {
    /// Nothing observed yet (the element of an empty array).
    #[default]
    Bottom,
    /// Only `null` observed.
    Null,
    Bool,
    Num(NumC),
    Str(StrC),
    Arr(Box<Shape>),
    Obj(ObjC),
    /// Observations of different kinds.
    Mixed,
}

impl Shape {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Shape::Bottom => "nothing",
            Shape::Null => "null",
            Shape::Bool => "boolean",
            Shape::Num(_) => "number",
            Shape::Str(_) => "string",
            Shape::Arr(_) => "array",
            Shape::Obj(_) => "object",
            Shape::Mixed => "mixed",
        }
    }
}

// ------------------------------ Observe ---------------------------------- //

pub fn observe_value(v: &Value) -> Shape {
    match v {
        Value::Null => Shape::Null,
        Value::Bool(_) => Shape::Bool,
        Value::Number(n) => Shape::Num(NumC::observe(n)),
        Value::String(s) => Shape::Str(StrC::observe(s)),
        Value::Array(xs) => observe_array(xs),
        Value::Object(m) => observe_object(m),
    }
}

fn observe_array(xs: &[Value]) -> Shape {
    let mut item = Shape::Bottom;
    for el in xs {
        item = join(&item, &observe_value(el));
    }
    Shape::Arr(Box::new(item))
}

fn observe_object(map: &Map<String, Value>) -> Shape {
    let mut obj = ObjC::default();
    obj.seen_objects = 1;
    for (k, v) in map {
        obj.fields.insert(k.clone(), FieldC {
            shape: observe_value(v),
            present_in: 1,
            non_null_in: if v.is_null() { 0 } else { 1 },
        });
    }
    Shape::Obj(obj)
}

// -------------------------------- Join (⊔) -------------------------------- //

pub fn join(a: &Shape, b: &Shape) -> Shape {
    match (a, b) {
        (Shape::Bottom, x) | (x, Shape::Bottom) => x.clone(),
        // a concrete kind always wins over null
        (Shape::Null, x) | (x, Shape::Null) => x.clone(),
        (Shape::Mixed, _) | (_, Shape::Mixed) => Shape::Mixed,
        (Shape::Bool, Shape::Bool) => Shape::Bool,
        (Shape::Num(x), Shape::Num(y)) => Shape::Num(NumC::join(x, y)),
        (Shape::Str(x), Shape::Str(y)) => Shape::Str(StrC::join(x, y)),
        (Shape::Arr(x), Shape::Arr(y)) => Shape::Arr(Box::new(join(x, y))),
        (Shape::Obj(x), Shape::Obj(y)) => Shape::Obj(ObjC::join(x, y)),
        (x, y) => {
            tracing::trace!(left = x.kind_name(), right = y.kind_name(), "kinds disagree, degrading to mixed");
            Shape::Mixed
        }
    }
}

// ------------------------------- Front API -------------------------------- //

#[derive(Debug, Default)]
pub struct Inference { state: Shape }

impl Inference {
    pub fn new() -> Self { Self { state: Shape::Bottom } }

    pub fn observe_value(&mut self, v: &Value) {
        let obs = observe_value(v);
        self.state = join(&self.state, &obs);
    }

    pub fn solve(self) -> Shape {
        self.state
    }
}

pub fn infer_from_values<'a, I>(values: I) -> Shape
where
    I: IntoIterator<Item = &'a Value>
{
    let mut inf = Inference::new();
    for v in values {
        inf.observe_value(v);
    }
    inf.solve()
}

// ------------------------------- Tests ------------------------------------ //
