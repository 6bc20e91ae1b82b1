//! Validation rules
//!
//! A rule inspects one value (and its sibling properties) and returns the
//! deviations it finds. An empty result means the rule passed.

use regex::Regex;

use super::comparison::{compile_pattern, CompareOp, ObjectComparator};
use super::errors::SchemaResult;
use super::result::{ResultCode, ValidationResult};
use super::schema::Schema;
use crate::access::PathAccessor;
use crate::typing::{TypeDescriptor, TypeMatcher};
use crate::value::Value;

/// Closed set of validation rules.
#[derive(Debug, Clone)]
pub enum Rule {
    /// Value must match a type descriptor
    TypeMatch(TypeDescriptor),
    /// Every named property must be non-null
    RequiredExists(Vec<String>),
    /// At least one named property must be non-null
    AtLeastOneExists(Vec<String>),
    /// Exactly one named property must be non-null
    OnlyOneExists(Vec<String>),
    /// Value must equal one of the listed values
    IncludedValues(Vec<Value>),
    /// Value must equal none of the listed values
    ExcludedValues(Vec<Value>),
    /// Value compared against a constant
    ValueComparison {
        op: CompareOp,
        reference: Value,
        pattern: Option<Regex>,
    },
    /// Two properties of the value compared against each other
    PropertiesComparison {
        left: String,
        op: CompareOp,
        right: String,
    },
    /// Passes when every rule passes
    And(Vec<Rule>),
    /// Passes when any rule passes
    Or(Vec<Rule>),
    /// Passes when the inner rule fails
    Not(Box<Rule>),
}

fn names_of<I, S>(names: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    names.into_iter().map(Into::into).collect()
}

fn list(values: &[Value]) -> String {
    values
        .iter()
        .map(|value| value.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

impl Rule {
    pub fn type_match(descriptor: &str) -> SchemaResult<Rule> {
        Ok(Rule::TypeMatch(TypeDescriptor::parse(descriptor)?))
    }

    pub fn required_exists<I, S>(names: I) -> Rule
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Rule::RequiredExists(names_of(names))
    }

    pub fn at_least_one_exists<I, S>(names: I) -> Rule
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Rule::AtLeastOneExists(names_of(names))
    }

    pub fn only_one_exists<I, S>(names: I) -> Rule
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Rule::OnlyOneExists(names_of(names))
    }

    pub fn included_values<I, V>(values: I) -> Rule
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Rule::IncludedValues(values.into_iter().map(Into::into).collect())
    }

    pub fn excluded_values<I, V>(values: I) -> Rule
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Rule::ExcludedValues(values.into_iter().map(Into::into).collect())
    }

    /// Builds a constant comparison. LIKE patterns are compiled here.
    ///
    /// # Errors
    ///
    /// `InvalidOperator` for an unknown operator, `InvalidPattern` for a
    /// LIKE pattern that is not a valid regular expression.
    pub fn value_comparison(op: &str, reference: impl Into<Value>) -> SchemaResult<Rule> {
        let op = CompareOp::parse(op)?;
        let reference = reference.into();
        let pattern = match op {
            CompareOp::Like => Some(compile_pattern(&reference.to_string())?),
            _ => None,
        };
        Ok(Rule::ValueComparison {
            op,
            reference,
            pattern,
        })
    }

    pub fn properties_comparison(
        left: impl Into<String>,
        op: &str,
        right: impl Into<String>,
    ) -> SchemaResult<Rule> {
        Ok(Rule::PropertiesComparison {
            left: left.into(),
            op: CompareOp::parse(op)?,
            right: right.into(),
        })
    }

    pub fn and(rules: impl IntoIterator<Item = Rule>) -> Rule {
        Rule::And(rules.into_iter().collect())
    }

    pub fn or(rules: impl IntoIterator<Item = Rule>) -> Rule {
        Rule::Or(rules.into_iter().collect())
    }

    pub fn not(rule: Rule) -> Rule {
        Rule::Not(Box::new(rule))
    }

    /// Evaluates the rule on its own against a root value.
    pub fn validate(&self, value: &Value) -> Vec<ValidationResult> {
        self.evaluate(&PathAccessor::default(), "", &Schema::default(), value)
    }

    /// Evaluates the rule against `value` located at `path` under `schema`.
    /// Property lookups inside `value` go through `paths`.
    pub fn evaluate(
        &self,
        paths: &PathAccessor,
        path: &str,
        schema: &Schema,
        value: &Value,
    ) -> Vec<ValidationResult> {
        match self {
            Rule::TypeMatch(descriptor) => {
                if TypeMatcher::matches(descriptor, value) {
                    Vec::new()
                } else {
                    vec![ValidationResult::error(
                        path,
                        ResultCode::TypeMismatch,
                        format!(
                            "Expected type {} but found {}",
                            descriptor,
                            value.kind_name()
                        ),
                    )
                    .with_expected(descriptor.to_string())
                    .with_actual(value.kind_name())]
                }
            }

            Rule::RequiredExists(names) => names
                .iter()
                .filter(|name| !Self::exists(paths, value, name))
                .map(|name| {
                    ValidationResult::error(
                        path,
                        ResultCode::PropertyMissing,
                        format!("Property {} is missing", name),
                    )
                    .with_expected(name.as_str())
                })
                .collect(),

            Rule::AtLeastOneExists(names) => {
                if names.iter().any(|name| Self::exists(paths, value, name)) {
                    Vec::new()
                } else {
                    vec![ValidationResult::error(
                        path,
                        ResultCode::AtLeastOneMissing,
                        format!("At least one of {} must be set", names.join(", ")),
                    )]
                }
            }

            Rule::OnlyOneExists(names) => {
                let present: Vec<&String> = names
                    .iter()
                    .filter(|name| Self::exists(paths, value, name))
                    .collect();
                if present.len() == 1 {
                    Vec::new()
                } else {
                    vec![ValidationResult::error(
                        path,
                        ResultCode::OnlyOneViolated,
                        format!(
                            "Exactly one of {} must be set, found {}",
                            names.join(", "),
                            present.len()
                        ),
                    )]
                }
            }

            Rule::IncludedValues(values) => {
                if values.iter().any(|v| ObjectComparator::are_equal(value, v)) {
                    Vec::new()
                } else {
                    vec![ValidationResult::error(
                        path,
                        ResultCode::ValueNotIncluded,
                        format!("Value {} must be one of {}", value, list(values)),
                    )
                    .with_expected(values.clone())
                    .with_actual(value.clone())]
                }
            }

            Rule::ExcludedValues(values) => {
                if values.iter().any(|v| ObjectComparator::are_equal(value, v)) {
                    vec![ValidationResult::error(
                        path,
                        ResultCode::ValueIncluded,
                        format!("Value {} must not be one of {}", value, list(values)),
                    )
                    .with_expected(values.clone())
                    .with_actual(value.clone())]
                } else {
                    Vec::new()
                }
            }

            Rule::ValueComparison {
                op,
                reference,
                pattern,
            } => {
                let passed = match pattern {
                    Some(regex) => ObjectComparator::is_like(value, regex),
                    None => ObjectComparator::evaluate(value, *op, reference),
                };
                if passed {
                    Vec::new()
                } else {
                    vec![ValidationResult::error(
                        path,
                        op.failure_code(),
                        format!("Value {} must be {} {}", value, op, reference),
                    )
                    .with_expected(reference.clone())
                    .with_actual(value.clone())]
                }
            }

            Rule::PropertiesComparison { left, op, right } => {
                let a = paths.get(value, left).unwrap_or_default();
                let b = paths.get(value, right).unwrap_or_default();
                if ObjectComparator::evaluate(&a, *op, &b) {
                    Vec::new()
                } else {
                    vec![ValidationResult::error(
                        path,
                        op.failure_code(),
                        format!(
                            "Property {} ({}) must be {} property {} ({})",
                            left, a, op, right, b
                        ),
                    )
                    .with_expected(b)
                    .with_actual(a)]
                }
            }

            Rule::And(rules) => rules
                .iter()
                .flat_map(|rule| rule.evaluate(paths, path, schema, value))
                .collect(),

            Rule::Or(rules) => {
                let mut failures = Vec::new();
                for rule in rules {
                    let results = rule.evaluate(paths, path, schema, value);
                    if results.is_empty() {
                        return Vec::new();
                    }
                    failures.extend(results);
                }
                failures
            }

            Rule::Not(rule) => {
                if rule.evaluate(paths, path, schema, value).is_empty() {
                    vec![ValidationResult::error(
                        path,
                        ResultCode::NotFailed,
                        "Negated rule must not pass",
                    )]
                } else {
                    Vec::new()
                }
            }
        }
    }

    fn exists(paths: &PathAccessor, value: &Value, name: &str) -> bool {
        paths
            .get(value, name)
            .map(|property| !property.is_null())
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::validation::ResultSeverity;
    use serde_json::json;

    fn codes(results: &[ValidationResult]) -> Vec<ResultCode> {
        results.iter().map(|r| r.code).collect()
    }

    #[test]
    fn test_like_rule() {
        let rule = Rule::value_comparison("LIKE", "A.*").unwrap();
        assert!(rule.validate(&Value::from("ABC")).is_empty());

        let results = rule.validate(&Value::from("XYZ"));
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].severity, ResultSeverity::Error);
        assert_eq!(results[0].code, ResultCode::NotLike);
    }

    #[test]
    fn test_invalid_construction() {
        assert_eq!(
            Rule::value_comparison("LIKE", "(").unwrap_err().code(),
            "INVALID_PATTERN"
        );
        assert_eq!(
            Rule::value_comparison("~~", 1).unwrap_err().code(),
            "INVALID_OPERATOR"
        );
        assert_eq!(Rule::type_match("int[").unwrap_err().code(), "MALFORMED_TYPE");
    }

    #[test]
    fn test_value_comparison() {
        let rule = Rule::value_comparison(">=", 18).unwrap();
        assert!(rule.validate(&Value::from(21)).is_empty());
        assert!(rule.validate(&Value::from("18")).is_empty());
        assert_eq!(codes(&rule.validate(&Value::from(3))), vec![ResultCode::NotGe]);
    }

    #[test]
    fn test_presence_rules() {
        let value = Value::from(json!({"a": 1, "b": null, "c": "x"}));

        assert!(Rule::required_exists(["a", "c"]).validate(&value).is_empty());
        assert_eq!(
            codes(&Rule::required_exists(["a", "b", "d"]).validate(&value)),
            vec![ResultCode::PropertyMissing, ResultCode::PropertyMissing]
        );

        assert!(Rule::at_least_one_exists(["b", "c"]).validate(&value).is_empty());
        assert_eq!(
            codes(&Rule::at_least_one_exists(["b", "d"]).validate(&value)),
            vec![ResultCode::AtLeastOneMissing]
        );

        assert!(Rule::only_one_exists(["a", "b"]).validate(&value).is_empty());
        assert_eq!(
            codes(&Rule::only_one_exists(["a", "c"]).validate(&value)),
            vec![ResultCode::OnlyOneViolated]
        );
        assert_eq!(
            codes(&Rule::only_one_exists(["b", "d"]).validate(&value)),
            vec![ResultCode::OnlyOneViolated]
        );
    }

    #[test]
    fn test_membership_rules() {
        let included = Rule::included_values(["red", "green"]);
        assert!(included.validate(&Value::from("red")).is_empty());
        assert_eq!(
            codes(&included.validate(&Value::from("blue"))),
            vec![ResultCode::ValueNotIncluded]
        );

        let excluded = Rule::excluded_values([1, 2]);
        assert!(excluded.validate(&Value::from(3)).is_empty());
        assert_eq!(
            codes(&excluded.validate(&Value::from("2"))),
            vec![ResultCode::ValueIncluded]
        );
    }

    #[test]
    fn test_lookups_use_given_accessor() {
        let value = Value::from(json!({"a": {"b": {"lo": 1}}, "hi": 5}));
        let shallow = PathAccessor::new(EngineConfig::with_max_depth(2));
        let schema = Schema::default();

        let exists = Rule::required_exists(["a.b.lo"]);
        assert!(exists.validate(&value).is_empty());
        assert_eq!(
            codes(&exists.evaluate(&shallow, "", &schema, &value)),
            vec![ResultCode::PropertyMissing]
        );

        let compare = Rule::properties_comparison("a.b.lo", "<", "hi").unwrap();
        assert!(compare.validate(&value).is_empty());
        assert_eq!(
            codes(&compare.evaluate(&shallow, "", &schema, &value)),
            vec![ResultCode::NotLt]
        );
    }

    #[test]
    fn test_properties_comparison() {
        let rule = Rule::properties_comparison("min", "<=", "max").unwrap();
        assert!(rule
            .validate(&Value::from(json!({"min": 1, "max": 5})))
            .is_empty());
        assert_eq!(
            codes(&rule.validate(&Value::from(json!({"min": 9, "max": 5})))),
            vec![ResultCode::NotLe]
        );
    }

    #[test]
    fn test_and_or_not() {
        let pass = Rule::value_comparison("GT", 0).unwrap();
        let fail_a = Rule::value_comparison("LT", 0).unwrap();
        let fail_b = Rule::included_values([100]);
        let value = Value::from(5);

        assert!(Rule::and([pass.clone(), pass.clone()]).validate(&value).is_empty());
        assert_eq!(
            Rule::and([pass.clone(), fail_a.clone(), fail_b.clone()])
                .validate(&value)
                .len(),
            2
        );

        assert!(Rule::or([fail_a.clone(), pass.clone()]).validate(&value).is_empty());
        assert_eq!(
            codes(&Rule::or([fail_a.clone(), fail_b.clone()]).validate(&value)),
            vec![ResultCode::NotLt, ResultCode::ValueNotIncluded]
        );

        assert_eq!(
            codes(&Rule::not(pass).validate(&value)),
            vec![ResultCode::NotFailed]
        );
        assert!(Rule::not(fail_a).validate(&value).is_empty());
    }

    #[test]
    fn test_type_match_rule() {
        let rule = Rule::type_match("long").unwrap();
        assert!(rule.validate(&Value::from(1)).is_empty());
        let results = rule.validate(&Value::from("x"));
        assert_eq!(codes(&results), vec![ResultCode::TypeMismatch]);
        assert_eq!(results[0].expected, Some(Value::from("long")));
    }
}
