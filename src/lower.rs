use crate::inference::{NumC, ObjC, Shape};
use crate::ir::{Field, Ty};
use crate::naming::{NameStyle, Namer};
use crate::options::NumberPolicy;

/// Policies applied while turning evidence into the typed IR.
#[derive(Debug, Clone, Copy)]
pub struct Lowering {
    pub numbers: NumberPolicy,
    pub detect_time: bool,
    pub names: NameStyle,
}

impl Lowering {
    pub fn lower(&self, shape: &Shape) -> Ty {
        match shape {
            // nothing, only null, or disagreeing kinds: no static type to offer
            Shape::Bottom | Shape::Null | Shape::Mixed => Ty::Unknown,
            Shape::Bool => Ty::Bool,
            Shape::Num(num) => self.lower_number(num),
            Shape::Str(s) => {
                if self.detect_time && s.all_time { Ty::Time } else { Ty::String }
            }
            Shape::Arr(item) => Ty::Array(Box::new(self.lower(item))),
            Shape::Obj(obj) => Ty::Object(self.lower_fields(obj)),
        }
    }

    fn lower_number(&self, num: &NumC) -> Ty {
        match self.numbers {
            NumberPolicy::Unified => Ty::Float,
            NumberPolicy::SplitIntegers if num.saw_float => Ty::Float,
            NumberPolicy::SplitIntegers if num.saw_wide => Ty::Int64,
            NumberPolicy::SplitIntegers => Ty::Int,
        }
    }

    fn lower_fields(&self, obj: &ObjC) -> Vec<Field> {
        let mut namer = Namer::new();
        obj.fields
            .iter()
            .enumerate()
            .map(|(i, (key, field_c))| {
                let base = self.names.field_ident(key, i + 1);
                Field {
                    key: key.clone(),
                    ident: namer.claim(&base),
                    ty: self.lower(&field_c.shape),
                    optional: field_c.is_optional(obj.seen_objects),
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inference::observe_value;
    use serde_json::json;

    fn go() -> Lowering {
        Lowering { numbers: NumberPolicy::SplitIntegers, detect_time: true, names: NameStyle::go(true) }
    }

    fn fields(ty: Ty) -> Vec<Field> {
        match ty {
            Ty::Object(fields) => fields,
            other => panic!("expected object, got {other:?}"),
        }
    }

    #[test]
    fn scenario_fields_in_order() {
        let ty = go().lower(&observe_value(&json!({"name": "Ann", "age": 30, "tags": ["x", "y"]})));
        let fs = fields(ty);
        let summary: Vec<(&str, &str, &Ty)> = fs.iter().map(|f| (f.key.as_str(), f.ident.as_str(), &f.ty)).collect();
        assert_eq!(summary, vec![
            ("name", "Name", &Ty::String),
            ("age", "Age", &Ty::Int),
            ("tags", "Tags", &Ty::Array(Box::new(Ty::String))),
        ]);
        assert!(fs.iter().all(|f| !f.optional));
    }

    #[test]
    fn number_policies() {
        let v = json!({"small": 3, "big": 4_000_000_000i64, "frac": 0.5, "mixed": [1, 1.5]});
        let split = fields(go().lower(&observe_value(&v)));
        let tys: Vec<&Ty> = split.iter().map(|f| &f.ty).collect();
        assert_eq!(tys, vec![&Ty::Int, &Ty::Int64, &Ty::Float, &Ty::Array(Box::new(Ty::Float))]);

        let unified = Lowering { numbers: NumberPolicy::Unified, ..go() };
        let all = fields(unified.lower(&observe_value(&v)));
        assert_eq!(all[0].ty, Ty::Float);
        assert_eq!(all[1].ty, Ty::Float);
    }

    #[test]
    fn unsigned_beyond_i64_lowers_to_float() {
        let fs = fields(go().lower(&observe_value(&json!({"huge": u64::MAX, "max": i64::MAX}))));
        assert_eq!(fs[0].ty, Ty::Float);
        assert_eq!(fs[1].ty, Ty::Int64);
    }

    #[test]
    fn colliding_keys_keep_both_fields() {
        let fs = fields(go().lower(&observe_value(&json!({"a-b": 1, "a_b": 2}))));
        assert_eq!(fs.len(), 2);
        assert_eq!(fs[0].ident, "AB");
        assert_eq!(fs[1].ident, "AB2");
        assert_eq!(fs[1].key, "a_b");
    }

    #[test]
    fn placeholder_collides_with_real_key() {
        let fs = fields(go().lower(&observe_value(&json!({"Field2": 1, "": 2}))));
        assert_eq!(fs[0].ident, "Field2");
        assert_eq!(fs[1].ident, "Field22");
    }

    #[test]
    fn time_detection_can_be_disabled() {
        let v = json!({"at": "2024-02-11T09:30:00Z"});
        assert_eq!(fields(go().lower(&observe_value(&v)))[0].ty, Ty::Time);
        let plain = Lowering { detect_time: false, ..go() };
        assert_eq!(fields(plain.lower(&observe_value(&v)))[0].ty, Ty::String);
    }

    #[test]
    fn unknowns() {
        let v = json!({"none": null, "empty": [], "mixed": [1, "two", true]});
        let fs = fields(go().lower(&observe_value(&v)));
        assert_eq!(fs[0].ty, Ty::Unknown);
        assert_eq!(fs[1].ty, Ty::Array(Box::new(Ty::Unknown)));
        assert_eq!(fs[2].ty, Ty::Array(Box::new(Ty::Unknown)));
    }
}
