//! 库存数据模型

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// 低库存阈值（数量低于该值即为低库存）
pub const LOW_STOCK_THRESHOLD: i64 = 10;

/// 旧版本写入的记录可能缺字段或带 `null`（例如价格解析失败时落盘为 `null`），
/// 读取时按空字符串 / 0 处理，避免一条坏记录拖垮整个文档
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub category: String,
    #[serde(default, deserialize_with = "lenient_price")]
    pub price: f64,
    #[serde(default, deserialize_with = "lenient_quantity")]
    pub quantity: i64,
}

fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => s,
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    })
}

fn lenient_price<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    let price = match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    Ok(price.filter(|p| p.is_finite()).unwrap_or(0.0))
}

fn lenient_quantity<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    let quantity = match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        Some(Value::String(s)) => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    Ok(quantity.unwrap_or(0))
}

impl Product {
    pub fn is_low_stock(&self) -> bool {
        self.quantity < LOW_STOCK_THRESHOLD
    }

    /// 库存价值 = 单价 × 数量
    pub fn stock_value(&self) -> f64 {
        self.price * self.quantity as f64
    }
}

/// 持久化文档：`products` 字段之外的顶层字段原样保留
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InventoryDocument {
    pub products: Vec<Product>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl InventoryDocument {
    pub fn new(products: Vec<Product>) -> Self {
        Self {
            products,
            extra: Map::new(),
        }
    }

    pub fn find(&self, id: i64) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn find_mut(&mut self, id: i64) -> Option<&mut Product> {
        self.products.iter_mut().find(|p| p.id == id)
    }

    /// 删除指定 id 的产品，返回是否确实删除了记录
    pub fn remove(&mut self, id: i64) -> bool {
        let before = self.products.len();
        self.products.retain(|p| p.id != id);
        self.products.len() != before
    }

    /// 生成新的产品 id：取创建时刻的毫秒时间戳，冲突时顺延到当前最大 id + 1
    pub fn next_id(&self, now_millis: i64) -> i64 {
        let max_id = self.products.iter().map(|p| p.id).max();
        match max_id {
            Some(max) if now_millis <= max => max.saturating_add(1),
            _ => now_millis,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: i64, quantity: i64) -> Product {
        Product {
            id,
            name: format!("p{}", id),
            description: "d".to_string(),
            category: "c".to_string(),
            price: 2.5,
            quantity,
        }
    }

    #[test]
    fn test_next_id_uses_timestamp() {
        let doc = InventoryDocument::new(vec![product(100, 1)]);
        assert_eq!(doc.next_id(5_000), 5_000);
    }

    #[test]
    fn test_next_id_bumps_on_collision() {
        let doc = InventoryDocument::new(vec![product(5_000, 1), product(4_000, 1)]);
        assert_eq!(doc.next_id(5_000), 5_001);
        assert_eq!(doc.next_id(4_500), 5_001);
    }

    #[test]
    fn test_document_keeps_extra_fields() {
        let raw = r#"{"products":[],"users":[{"name":"admin"}],"version":3}"#;
        let doc: InventoryDocument = serde_json::from_str(raw).unwrap();
        assert_eq!(doc.extra.len(), 2);

        let back = serde_json::to_value(&doc).unwrap();
        assert_eq!(back["version"], 3);
        assert_eq!(back["users"][0]["name"], "admin");
    }

    #[test]
    fn test_remove_reports_presence() {
        let mut doc = InventoryDocument::new(vec![product(1, 1), product(2, 1)]);
        assert!(doc.remove(1));
        assert!(!doc.remove(1));
        assert_eq!(doc.products.len(), 1);
    }

    #[test]
    fn test_low_stock_and_value() {
        assert!(product(1, 9).is_low_stock());
        assert!(!product(1, 10).is_low_stock());
        assert_eq!(product(1, 4).stock_value(), 10.0);
    }

    #[test]
    fn test_legacy_null_fields_load_as_blank() {
        let raw = r#"{"products":[
            {"id":1,"name":"Bun","description":null,"category":"Bakery","price":null,"quantity":null},
            {"id":2,"name":"Tea","price":"3.5","quantity":"4"},
            {"id":3,"name":"Pie","description":"d","category":"c","price":2.0,"quantity":5}
        ]}"#;
        let doc: InventoryDocument = serde_json::from_str(raw).unwrap();
        assert_eq!(doc.products.len(), 3);

        let bun = doc.find(1).unwrap();
        assert_eq!(bun.description, "");
        assert_eq!(bun.price, 0.0);
        assert_eq!(bun.quantity, 0);

        let tea = doc.find(2).unwrap();
        assert_eq!(tea.category, "");
        assert_eq!(tea.price, 3.5);
        assert_eq!(tea.quantity, 4);

        assert_eq!(doc.find(3).unwrap().stock_value(), 10.0);
    }
}
