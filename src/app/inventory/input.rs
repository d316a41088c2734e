//! 请求体结构与边界校验
//!
//! 价格和数量既可以是 JSON 数字，也可以是表单提交的字符串。
//! 无法解析的数值直接拒绝，不会以 NaN 之类的值落盘。

use serde::{Deserialize, Serialize};
use validator::Validate;

/// 数值输入：数字或字符串
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumericInput {
    Number(serde_json::Number),
    Text(String),
}

/// 输入解析错误
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum InputError {
    #[error("字段 {field} 不是有效的数字: {value:?}")]
    InvalidNumber { field: &'static str, value: String },
    #[error("字段 {field} 必须是整数: {value:?}")]
    NotInteger { field: &'static str, value: String },
    #[error("库存调整溢出: {quantity} + {change}")]
    StockOverflow { quantity: i64, change: i64 },
}

impl NumericInput {
    pub fn as_price(&self) -> Result<f64, InputError> {
        self.parse_f64("price")
    }

    pub fn as_quantity(&self) -> Result<i64, InputError> {
        let field = "quantity";
        match self {
            NumericInput::Number(n) => {
                if let Some(v) = n.as_i64() {
                    return Ok(v);
                }
                float_to_integer(field, self.parse_f64(field)?, n.to_string())
            }
            NumericInput::Text(s) => {
                let trimmed = s.trim();
                if let Ok(v) = trimmed.parse::<i64>() {
                    return Ok(v);
                }
                float_to_integer(field, self.parse_f64(field)?, s.clone())
            }
        }
    }

    fn parse_f64(&self, field: &'static str) -> Result<f64, InputError> {
        let (parsed, raw) = match self {
            NumericInput::Number(n) => (n.as_f64(), n.to_string()),
            NumericInput::Text(s) => (s.trim().parse::<f64>().ok(), s.clone()),
        };

        match parsed {
            Some(v) if v.is_finite() => Ok(v),
            _ => Err(InputError::InvalidNumber { field, value: raw }),
        }
    }
}

// 只接受没有小数部分且落在 i64 范围内的浮点数，例如 "20.0"
fn float_to_integer(field: &'static str, value: f64, raw: String) -> Result<i64, InputError> {
    if value.fract() != 0.0 || value < i64::MIN as f64 || value >= i64::MAX as f64 {
        return Err(InputError::NotInteger { field, value: raw });
    }
    Ok(value as i64)
}

impl From<&str> for NumericInput {
    fn from(s: &str) -> Self {
        NumericInput::Text(s.to_string())
    }
}

impl From<String> for NumericInput {
    fn from(s: String) -> Self {
        NumericInput::Text(s)
    }
}

// 创建产品请求
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateProductRequest {
    #[validate(length(min = 1, message = "产品名称不能为空"))]
    pub name: String,
    pub description: String,
    pub category: String,
    pub price: NumericInput,
    pub quantity: NumericInput,
}

// 更新产品请求（字段均可省略，省略的字段保持原值）
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateProductRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "产品名称不能为空"))]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<NumericInput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<NumericInput>,
}

// 库存调整请求
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct StockAdjustRequest {
    pub change: i64,
}
