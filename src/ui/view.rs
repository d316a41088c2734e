//! 视图渲染：仪表盘、库存表格、占位页

use std::fmt;
use tabled::{builder::Builder, settings::Style};

use super::state::{ProductForm, View};
use crate::app::inventory::Product;

/// 仪表盘统计，每次渲染时重新计算
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DashboardStats {
    pub total_products: usize,
    pub low_stock: usize,
    pub inventory_value: f64,
}

impl DashboardStats {
    pub fn from_products(products: &[Product]) -> Self {
        Self {
            total_products: products.len(),
            low_stock: products.iter().filter(|p| p.is_low_stock()).count(),
            inventory_value: products.iter().map(Product::stock_value).sum(),
        }
    }

    /// 库存价值，保留两位小数
    pub fn formatted_value(&self) -> String {
        format!("R{:.2}", self.inventory_value)
    }
}

impl fmt::Display for DashboardStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total Products: {}", self.total_products)?;
        writeln!(f, "Low Stock: {}", self.low_stock)?;
        write!(f, "Inventory Value: {}", self.formatted_value())
    }
}

pub fn render_dashboard(products: &[Product]) -> String {
    format!(
        "📊 Dashboard\n\n{}\n",
        DashboardStats::from_products(products)
    )
}

pub fn render_inventory(products: &[Product]) -> String {
    let mut builder = Builder::default();
    builder.push_record(["ID", "Name", "Category", "Price", "Qty", "Status"]);

    for p in products {
        let marker = if p.is_low_stock() { "⚠️ low" } else { "" };
        builder.push_record([
            p.id.to_string(),
            p.name.clone(),
            p.category.clone(),
            format!("R{}", p.price),
            p.quantity.to_string(),
            marker.to_string(),
        ]);
    }

    let mut table = builder.build();
    table.with(Style::modern_rounded());

    format!("📦 Inventory\n\n{}\n", table)
}

pub fn render_form(form: &ProductForm, editing_id: Option<i64>) -> String {
    let title = match editing_id {
        Some(id) => format!("Edit Product #{}", id),
        None => "Add New Product".to_string(),
    };

    let mut builder = Builder::default();
    builder.push_record(["Product Name", form.name.as_str()]);
    builder.push_record(["Description", form.description.as_str()]);
    builder.push_record(["Category", form.category.as_str()]);
    builder.push_record(["Price", form.price.as_str()]);
    builder.push_record(["Quantity", form.quantity.as_str()]);

    let mut table = builder.build();
    table.with(Style::modern_rounded());

    format!("{}\n{}\n", title, table)
}

pub fn render_placeholder(view: View) -> String {
    format!("{}\n\nComing Soon\n", view.title())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: i64, price: f64, quantity: i64) -> Product {
        Product {
            id,
            name: format!("item-{}", id),
            description: "d".to_string(),
            category: "Bakery".to_string(),
            price,
            quantity,
        }
    }

    #[test]
    fn test_empty_dashboard() {
        let stats = DashboardStats::from_products(&[]);
        assert_eq!(stats.total_products, 0);
        assert_eq!(stats.low_stock, 0);
        assert_eq!(stats.formatted_value(), "R0.00");
    }

    #[test]
    fn test_dashboard_aggregates() {
        let products = vec![product(1, 5.5, 20), product(2, 2.0, 3), product(3, 1.25, 9)];
        let stats = DashboardStats::from_products(&products);

        assert_eq!(stats.total_products, 3);
        assert_eq!(stats.low_stock, 2);
        assert_eq!(stats.formatted_value(), "R127.25");

        let rendered = render_dashboard(&products);
        assert!(rendered.contains("Total Products: 3"));
        assert!(rendered.contains("Low Stock: 2"));
        assert!(rendered.contains("Inventory Value: R127.25"));
    }

    #[test]
    fn test_inventory_marks_low_stock() {
        let rendered = render_inventory(&[product(1, 5.5, 20), product(2, 2.0, 3)]);
        let low_rows: Vec<&str> = rendered.lines().filter(|l| l.contains("low")).collect();

        assert_eq!(low_rows.len(), 1);
        assert!(low_rows[0].contains("item-2"));

        let header = rendered.lines().find(|l| l.contains("Qty")).unwrap();
        assert!(header.contains("Status"));
        assert!(rendered.contains("R5.5"));
    }

    #[test]
    fn test_placeholder() {
        assert!(render_placeholder(View::Sales).contains("Coming Soon"));
    }
}
