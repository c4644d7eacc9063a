//! 产品校验规则

use crate::core::validation::{
    as_bool, as_int, as_number, as_text, is_boolean, is_int, is_numeric, is_positive, not_empty,
    Location, RequestInput, Rule, RuleSet,
};

use super::model::{NewProduct, ProductChanges};

pub const INVALID_ID: &str = "ID no valido";
pub const EMPTY_NAME: &str = "El nombre de Producto no puede ir vacio";
pub const INVALID_PRICE: &str = "Valor no válido";
pub const EMPTY_PRICE: &str = "El precio de Producto no puede ir vacio";
pub const NON_POSITIVE_PRICE: &str = "El precio no debe ser menos que 0";
pub const INVALID_AVAILABILITY: &str = "Valor para disponibilidad no válido";

const ID: Rule = Rule::param("id", is_int, INVALID_ID);

const NAME_AND_PRICE: [Rule; 4] = [
    Rule::body("name", not_empty, EMPTY_NAME),
    Rule::body("price", is_numeric, INVALID_PRICE),
    Rule::body("price", not_empty, EMPTY_PRICE),
    Rule::body("price", is_positive, NON_POSITIVE_PRICE),
];

const AVAILABILITY: Rule = Rule::body("availability", is_boolean, INVALID_AVAILABILITY);

/// `:id` 必须为整数
pub struct IdRules;

/// `POST /` 请求体
pub struct CreateRules;

/// `:id` 加 `PUT /:id` 完整请求体
pub struct UpdateRules;

fn id(input: &RequestInput) -> Option<i64> {
    as_int(input.value(Location::Params, "id").as_ref())
}

fn body_field(input: &RequestInput, field: &str) -> Option<serde_json::Value> {
    input.value(Location::Body, field)
}

impl RuleSet for IdRules {
    type Output = i64;

    const RULES: &'static [Rule] = &[ID];

    fn extract(input: &RequestInput) -> Option<Self::Output> {
        id(input)
    }
}

impl RuleSet for CreateRules {
    type Output = NewProduct;

    const RULES: &'static [Rule] = &NAME_AND_PRICE;

    fn extract(input: &RequestInput) -> Option<Self::Output> {
        Some(NewProduct {
            name: as_text(body_field(input, "name").as_ref()),
            price: as_number(body_field(input, "price").as_ref())?,
        })
    }
}

impl RuleSet for UpdateRules {
    type Output = (i64, ProductChanges);

    const RULES: &'static [Rule] = &[
        ID,
        NAME_AND_PRICE[0],
        NAME_AND_PRICE[1],
        NAME_AND_PRICE[2],
        NAME_AND_PRICE[3],
        AVAILABILITY,
    ];

    fn extract(input: &RequestInput) -> Option<Self::Output> {
        let changes = ProductChanges {
            name: as_text(body_field(input, "name").as_ref()),
            price: as_number(body_field(input, "price").as_ref())?,
            availability: as_bool(body_field(input, "availability").as_ref())?,
        };
        Some((id(input)?, changes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::validation::validate;
    use serde_json::{json, Value};
    use std::collections::HashMap;

    fn input(id: &str, body: Value) -> RequestInput {
        RequestInput::new(HashMap::from([("id".to_string(), id.to_string())]), body)
    }

    fn messages(rules: &[Rule], input: &RequestInput) -> Vec<String> {
        match validate(rules, input) {
            Ok(()) => Vec::new(),
            Err(errors) => errors.into_iter().map(|e| e.msg).collect(),
        }
    }

    #[test]
    fn create_rules_count_each_failing_price_check() {
        let empty = RequestInput::new(HashMap::new(), json!({}));
        assert_eq!(messages(CreateRules::RULES, &empty).len(), 4);

        let zero = RequestInput::new(HashMap::new(), json!({"name": "Tv", "price": 0}));
        assert_eq!(messages(CreateRules::RULES, &zero), [NON_POSITIVE_PRICE]);

        let text = RequestInput::new(HashMap::new(), json!({"name": "Tv", "price": "Hola"}));
        assert_eq!(
            messages(CreateRules::RULES, &text),
            [INVALID_PRICE, NON_POSITIVE_PRICE]
        );
    }

    #[test]
    fn exponent_price_string_only_fails_the_numeric_check() {
        let input = RequestInput::new(HashMap::new(), json!({"name": "Tv", "price": "1e3"}));
        assert_eq!(messages(CreateRules::RULES, &input), [INVALID_PRICE]);
    }

    #[test]
    fn large_float_price_is_accepted() {
        let body: Value = serde_json::from_str(r#"{"name": "Tv", "price": 1e17}"#).unwrap();
        let input = RequestInput::new(HashMap::new(), body);
        assert!(messages(CreateRules::RULES, &input).is_empty());
        assert_eq!(CreateRules::extract(&input).unwrap().price, 1e17);
    }

    #[test]
    fn create_extracts_numeric_strings() {
        let input = RequestInput::new(HashMap::new(), json!({"name": "Tv", "price": "250.5"}));
        assert!(validate(CreateRules::RULES, &input).is_ok());
        assert_eq!(
            CreateRules::extract(&input),
            Some(NewProduct {
                name: "Tv".to_string(),
                price: 250.5
            })
        );
    }

    #[test]
    fn update_rules_start_with_the_id() {
        let errors = messages(UpdateRules::RULES, &input("no", json!({})));
        assert_eq!(errors.len(), 6);
        assert_eq!(errors[0], INVALID_ID);
        assert_eq!(errors[5], INVALID_AVAILABILITY);

        assert_eq!(messages(UpdateRules::RULES, &input("1", json!({}))).len(), 5);
    }

    #[test]
    fn update_extracts_id_and_changes() {
        let input = input("7", json!({"name": "Tv", "price": 209, "availability": "false"}));
        assert!(validate(UpdateRules::RULES, &input).is_ok());
        let (id, changes) = UpdateRules::extract(&input).unwrap();
        assert_eq!(id, 7);
        assert_eq!(
            changes,
            ProductChanges {
                name: "Tv".to_string(),
                price: 209.0,
                availability: false
            }
        );
    }

    #[test]
    fn id_rules_reject_non_integers() {
        assert_eq!(messages(IdRules::RULES, &input("no", json!({}))), [INVALID_ID]);
        assert_eq!(messages(IdRules::RULES, &input("1.5", json!({}))), [INVALID_ID]);
        assert!(messages(IdRules::RULES, &input("2000", json!({}))).is_empty());
    }
}
