//! 请求校验模块
//!
//! 规则链是有序的 [`Rule`] 切片。每条规则都会按顺序针对路径参数或 JSON
//! 请求体求值，每条失败的规则产生一个 [`FieldError`]。
//! 错误列表为空时才会进入处理器。
//!
//! 标准谓词运行前先把值转成文本：缺失字段或 `null` 视为 `""`，
//! 数字和布尔值取其字面形式。[`is_positive`] 例外，直接对原始值做宽松比较。

use std::collections::HashMap;

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::header::CONTENT_TYPE,
};
use serde::Serialize;
use serde_json::{Map, Value};
use validator::{ValidateLength, ValidateRange};

use crate::core::error::AppError;

/// 被校验值的来源
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Location {
    Params,
    Body,
}

/// 单条失败规则
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    #[serde(rename = "type")]
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    pub msg: String,
    pub path: String,
    pub location: Location,
}

/// 字段谓词及其失败时的消息
#[derive(Clone, Copy)]
pub struct Rule {
    pub field: &'static str,
    pub location: Location,
    pub message: &'static str,
    pub check: fn(Option<&Value>) -> bool,
}

impl Rule {
    pub const fn param(
        field: &'static str,
        check: fn(Option<&Value>) -> bool,
        message: &'static str,
    ) -> Self {
        Self {
            field,
            location: Location::Params,
            message,
            check,
        }
    }

    pub const fn body(
        field: &'static str,
        check: fn(Option<&Value>) -> bool,
        message: &'static str,
    ) -> Self {
        Self {
            field,
            location: Location::Body,
            message,
            check,
        }
    }

    fn evaluate(&self, input: &RequestInput) -> Option<FieldError> {
        let value = input.value(self.location, self.field);
        if (self.check)(value.as_ref()) {
            return None;
        }
        Some(FieldError {
            kind: "field",
            value,
            msg: self.message.to_string(),
            path: self.field.to_string(),
            location: self.location,
        })
    }
}

/// 规则链读取的原始输入
#[derive(Debug, Clone, Default)]
pub struct RequestInput {
    pub params: HashMap<String, String>,
    pub body: Value,
}

impl RequestInput {
    pub fn new(params: HashMap<String, String>, body: Value) -> Self {
        Self { params, body }
    }

    pub fn value(&self, location: Location, field: &str) -> Option<Value> {
        match location {
            Location::Params => self.params.get(field).cloned().map(Value::String),
            Location::Body => self.body.get(field).cloned(),
        }
    }
}

/// 执行全部规则，按规则顺序收集失败项
pub fn validate(rules: &[Rule], input: &RequestInput) -> Result<(), Vec<FieldError>> {
    let errors: Vec<FieldError> = rules.iter().filter_map(|rule| rule.evaluate(input)).collect();
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// 命名规则链及其通过后产出的类型化值
pub trait RuleSet: Send + 'static {
    type Output: Send;

    const RULES: &'static [Rule];

    /// 转换已通过 [`Self::RULES`] 的输入
    fn extract(input: &RequestInput) -> Option<Self::Output>;
}

/// 在处理器之前执行规则链 `R` 的提取器
pub struct Validated<R: RuleSet>(pub R::Output);

#[async_trait]
impl<S, R> FromRequest<S> for Validated<R>
where
    S: Send + Sync,
    R: RuleSet,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let (mut parts, body) = req.into_parts();

        let params = Path::<HashMap<String, String>>::from_request_parts(&mut parts, state)
            .await
            .map(|Path(params)| params)
            .unwrap_or_default();

        let is_json = parts
            .headers
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.contains("json"))
            .unwrap_or(false);

        let bytes = Bytes::from_request(Request::from_parts(parts, body), state)
            .await
            .map_err(|rejection| AppError::MalformedBody(rejection.body_text()))?;

        let body = if is_json {
            parse_body(&bytes)?
        } else {
            Value::Object(Map::new())
        };

        let input = RequestInput::new(params, body);
        validate(R::RULES, &input).map_err(AppError::Validation)?;

        R::extract(&input)
            .map(Validated)
            .ok_or_else(|| AppError::MalformedBody("unreadable request input".to_string()))
    }
}

fn parse_body(bytes: &[u8]) -> Result<Value, AppError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Object(Map::new()));
    }
    serde_json::from_slice(bytes).map_err(|e| AppError::MalformedBody(e.to_string()))
}

// ---- 类型转换 ----

/// 标准谓词看到的文本形式
pub fn as_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => number_text(n),
        Some(Value::Bool(b)) => b.to_string(),
        Some(other) => other.to_string(),
    }
}

/// 数字转文本：|n| 在 [1e-6, 1e21) 内输出普通十进制，其余用指数形式
fn number_text(n: &serde_json::Number) -> String {
    if n.is_i64() || n.is_u64() {
        return n.to_string();
    }
    match n.as_f64() {
        Some(f) if f == 0.0 => "0".to_string(),
        Some(f) if (1e-6..1e21).contains(&f.abs()) => f.to_string(),
        Some(f) => format!("{:e}", f),
        None => n.to_string(),
    }
}

/// `^[+-]?([0-9]*\.)?[0-9]+$`
fn numeric_text(text: &str) -> bool {
    let unsigned = text
        .strip_prefix(|c: char| c == '+' || c == '-')
        .unwrap_or(text);
    let (whole, fraction) = unsigned.split_once('.').unwrap_or(("", unsigned));
    whole.chars().all(|c| c.is_ascii_digit())
        && !fraction.is_empty()
        && fraction.chars().all(|c| c.is_ascii_digit())
}

pub fn as_int(value: Option<&Value>) -> Option<i64> {
    as_text(value).parse().ok()
}

pub fn as_number(value: Option<&Value>) -> Option<f64> {
    let text = as_text(value);
    if numeric_text(&text) {
        text.parse().ok()
    } else {
        None
    }
}

pub fn as_bool(value: Option<&Value>) -> Option<bool> {
    match as_text(value).as_str() {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}

/// 原始值的宽松数值读取，用于大小比较
fn as_loose_number(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::Null => Some(0.0),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::Number(n) => n.as_f64(),
        Value::String(s) => loose_string_number(s),
        Value::Array(_) | Value::Object(_) => None,
    }
}

/// 字符串的宽松数值转换：空串为 0，支持指数、`0x`/`0o`/`0b` 前缀与 `Infinity`，其余为 NaN（None）
fn loose_string_number(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Some(0.0);
    }

    for (prefix, radix) in [("0x", 16), ("0o", 8), ("0b", 2)] {
        let digits = trimmed
            .strip_prefix(prefix)
            .or_else(|| trimmed.strip_prefix(&prefix.to_ascii_uppercase()));
        if let Some(digits) = digits {
            if digits.is_empty() {
                return None;
            }
            return digits.chars().try_fold(0.0_f64, |acc, c| {
                c.to_digit(radix).map(|d| acc * f64::from(radix) + f64::from(d))
            });
        }
    }

    let unsigned = trimmed
        .strip_prefix(|c: char| c == '+' || c == '-')
        .unwrap_or(trimmed);
    if unsigned == "Infinity" {
        return Some(if trimmed.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        });
    }

    // f64::from_str 还接受 "inf"、"nan"，这里只放行十进制字面量
    if !unsigned
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-'))
    {
        return None;
    }
    trimmed.parse().ok()
}

// ---- 谓词 ----

pub fn is_int(value: Option<&Value>) -> bool {
    as_int(value).is_some()
}

pub fn not_empty(value: Option<&Value>) -> bool {
    as_text(value).validate_length(Some(1u64), None, None)
}

pub fn is_numeric(value: Option<&Value>) -> bool {
    numeric_text(&as_text(value))
}

pub fn is_boolean(value: Option<&Value>) -> bool {
    as_bool(value).is_some()
}

/// 严格大于 0
pub fn is_positive(value: Option<&Value>) -> bool {
    as_loose_number(value)
        .map(|n| n.validate_range(None, None, Some(0.0_f64), None))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn body(value: Value) -> RequestInput {
        RequestInput::new(HashMap::new(), value)
    }

    #[test]
    fn numeric_text_matches_decimal_literals_only() {
        for ok in ["0", "12", "-3", "+4", "1.5", ".5", "007"] {
            assert!(numeric_text(ok), "{ok} should be numeric");
        }
        for bad in ["", "-", "5.", "1.2.3", "1e3", "Hola", " 1", "0x10"] {
            assert!(!numeric_text(bad), "{bad} should not be numeric");
        }
    }

    #[test]
    fn large_and_small_floats_read_as_plain_decimals_within_range() {
        let big: Value = serde_json::from_str("1e17").unwrap();
        assert_eq!(as_text(Some(&big)), "100000000000000000");
        assert!(is_numeric(Some(&big)));

        let fractional: Value = serde_json::from_str("123456789012345678.0").unwrap();
        assert!(is_numeric(Some(&fractional)));

        let huge: Value = serde_json::from_str("1e21").unwrap();
        assert!(!is_numeric(Some(&huge)));

        let tiny: Value = serde_json::from_str("1e-7").unwrap();
        assert!(!is_numeric(Some(&tiny)));

        assert_eq!(as_text(Some(&json!(1000.0))), "1000");
        assert_eq!(as_text(Some(&json!(12.5))), "12.5");
    }

    #[test]
    fn loose_string_numbers() {
        assert_eq!(loose_string_number("1e3"), Some(1000.0));
        assert_eq!(loose_string_number(" 42 "), Some(42.0));
        assert_eq!(loose_string_number("0x10"), Some(16.0));
        assert_eq!(loose_string_number("0b101"), Some(5.0));
        assert_eq!(loose_string_number("0o17"), Some(15.0));
        assert_eq!(loose_string_number("-Infinity"), Some(f64::NEG_INFINITY));
        assert_eq!(loose_string_number(""), Some(0.0));
        assert_eq!(loose_string_number("NaN"), None);
        assert_eq!(loose_string_number("inf"), None);
        assert_eq!(loose_string_number("0x"), None);
        assert_eq!(loose_string_number("0xZZ"), None);
        assert_eq!(loose_string_number("Hola"), None);

        assert!(is_positive(Some(&json!("1e3"))));
        assert!(is_positive(Some(&json!("Infinity"))));
        assert!(!is_positive(Some(&json!("-0x10"))));
    }

    #[test]
    fn text_coercion() {
        assert_eq!(as_text(None), "");
        assert_eq!(as_text(Some(&Value::Null)), "");
        assert_eq!(as_text(Some(&json!(1000))), "1000");
        assert_eq!(as_text(Some(&json!(true))), "true");
        assert_eq!(as_text(Some(&json!("Tv"))), "Tv");
    }

    #[test]
    fn positive_compares_raw_value() {
        assert!(is_positive(Some(&json!(1000))));
        assert!(is_positive(Some(&json!("12.5"))));
        assert!(is_positive(Some(&json!(true))));
        assert!(!is_positive(Some(&json!(0))));
        assert!(!is_positive(Some(&json!(-1))));
        assert!(!is_positive(Some(&json!("Hola"))));
        assert!(!is_positive(Some(&Value::Null)));
        assert!(!is_positive(None));
    }

    #[test]
    fn int_and_boolean_predicates() {
        assert!(is_int(Some(&json!("42"))));
        assert!(is_int(Some(&json!("-7"))));
        assert!(!is_int(Some(&json!("no"))));
        assert!(!is_int(Some(&json!("1.5"))));

        assert!(is_boolean(Some(&json!(true))));
        assert!(is_boolean(Some(&json!("0"))));
        assert!(!is_boolean(Some(&json!("yes"))));
        assert!(!is_boolean(None));
    }

    #[test]
    fn validate_keeps_rule_order_and_reports_every_failure() {
        const RULES: &[Rule] = &[
            Rule::body("name", not_empty, "name"),
            Rule::body("price", is_numeric, "numeric"),
            Rule::body("price", not_empty, "present"),
            Rule::body("price", is_positive, "positive"),
        ];

        let errors = validate(RULES, &body(json!({}))).unwrap_err();
        let messages: Vec<&str> = errors.iter().map(|e| e.msg.as_str()).collect();
        assert_eq!(messages, ["name", "numeric", "present", "positive"]);
        assert!(errors.iter().all(|e| e.value.is_none()));

        let errors = validate(RULES, &body(json!({"name": "Tv", "price": "Hola"}))).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].value, Some(json!("Hola")));

        assert!(validate(RULES, &body(json!({"name": "Tv", "price": 10}))).is_ok());
    }

    #[test]
    fn field_error_serializes_like_a_field_record() {
        let input = RequestInput::new(
            HashMap::from([("id".to_string(), "no".to_string())]),
            json!({}),
        );
        let rules = [Rule::param("id", is_int, "ID no valido")];
        let errors = validate(&rules, &input).unwrap_err();
        assert_eq!(
            serde_json::to_value(&errors[0]).unwrap(),
            json!({"type": "field", "value": "no", "msg": "ID no valido", "path": "id", "location": "params"})
        );
    }
}
