use indexmap::IndexMap;

use super::{join, Shape};

/// Object evidence: per-key statistics in first-seen order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ObjC {
    pub fields: IndexMap<String, FieldC>,
    pub seen_objects: u64,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct FieldC {
    pub shape: Shape,
    pub present_in: u64,
    pub non_null_in: u64,
}

impl FieldC {
    /// Absent from some sibling, or null in some sibling while concrete in another.
    pub fn is_optional(&self, seen_objects: u64) -> bool {
        self.present_in < seen_objects || (self.non_null_in > 0 && self.non_null_in < self.present_in)
    }
}

impl ObjC {
    pub(super) fn join(a: &Self, b: &Self) -> Self {
        let mut out = Self {
            fields: IndexMap::with_capacity(a.fields.len().max(b.fields.len())),
            seen_objects: a.seen_objects + b.seen_objects,
        };

        // keys of `a` first, merged with `b` where shared
        for (k, fa) in &a.fields {
            let field = match b.fields.get(k) {
                None => fa.clone(),
                Some(fb) => FieldC {
                    shape: join(&fa.shape, &fb.shape),
                    present_in: fa.present_in + fb.present_in,
                    non_null_in: fa.non_null_in + fb.non_null_in,
                },
            };
            out.fields.insert(k.clone(), field);
        }
        // then keys only in `b`, in b's order
        for (k, fb) in &b.fields {
            if !out.fields.contains_key(k) {
                out.fields.insert(k.clone(), fb.clone());
            }
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inference::observe_value;
    use serde_json::json;

    fn obj(shape: Shape) -> ObjC {
        match shape {
            Shape::Obj(o) => o,
            other => panic!("expected object, got {other:?}"),
        }
    }

    #[test]
    fn shared_keys_join_their_shapes() {
        let a = obj(observe_value(&json!({"k": null, "x": 1})));
        let b = obj(observe_value(&json!({"k": "v", "y": true})));
        let ab = ObjC::join(&a, &b);

        assert_eq!(ab.seen_objects, 2);
        assert_eq!(ab.fields.keys().collect::<Vec<_>>(), ["k", "x", "y"]);
        assert!(matches!(ab.fields["k"].shape, Shape::Str(_)));
        assert_eq!(ab.fields["k"].present_in, 2);
        assert_eq!(ab.fields["k"].non_null_in, 1);
        assert!(ab.fields["k"].is_optional(ab.seen_objects));
        assert!(ab.fields["x"].is_optional(ab.seen_objects));
    }
}
