//! 客户端视图模型
//!
//! 启动时拉取一次产品列表，之后所有视图都从本地副本派生；
//! 修改操作成功后用服务端返回的记录同步本地副本。

use std::fmt;
use tracing::warn;

use super::api::{ClientError, InventoryApi};
use super::view::{self, DashboardStats};
use crate::app::inventory::{CreateProductRequest, Product, UpdateProductRequest};

/// 导航目标
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum View {
    #[default]
    Dashboard,
    Inventory,
    Sales,
    Customer,
    Reporting,
}

impl View {
    pub fn title(&self) -> &'static str {
        match self {
            View::Dashboard => "📊 Dashboard",
            View::Inventory => "📦 Inventory",
            View::Sales => "Sales Module",
            View::Customer => "Customer Module",
            View::Reporting => "Reporting Module",
        }
    }
}

/// 表单字段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Description,
    Category,
    Price,
    Quantity,
}

/// 产品表单：五个文本字段
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductForm {
    pub name: String,
    pub description: String,
    pub category: String,
    pub price: String,
    pub quantity: String,
}

impl ProductForm {
    pub fn from_product(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            description: product.description.clone(),
            category: product.category.clone(),
            price: product.price.to_string(),
            quantity: product.quantity.to_string(),
        }
    }

    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        match field {
            FormField::Name => self.name = value,
            FormField::Description => self.description = value,
            FormField::Category => self.category = value,
            FormField::Price => self.price = value,
            FormField::Quantity => self.quantity = value,
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    fn to_create_request(&self) -> CreateProductRequest {
        CreateProductRequest {
            name: self.name.clone(),
            description: self.description.clone(),
            category: self.category.clone(),
            price: self.price.clone().into(),
            quantity: self.quantity.clone().into(),
        }
    }

    // 编辑时提交完整表单
    fn to_update_request(&self) -> UpdateProductRequest {
        UpdateProductRequest {
            name: Some(self.name.clone()),
            description: Some(self.description.clone()),
            category: Some(self.category.clone()),
            price: Some(self.price.clone().into()),
            quantity: Some(self.quantity.clone().into()),
        }
    }
}

pub struct InventoryApp<A> {
    api: A,
    current_view: View,
    products: Vec<Product>,
    show_form: bool,
    editing_id: Option<i64>,
    form: ProductForm,
}

impl<A: InventoryApi> InventoryApp<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            current_view: View::default(),
            products: Vec::new(),
            show_form: false,
            editing_id: None,
            form: ProductForm::default(),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// 首次加载产品列表；失败时列表保持为空，只记录日志
    pub async fn mount(&mut self) {
        match self.api.list_products().await {
            Ok(products) => self.products = products,
            Err(e) => warn!("加载产品列表失败: {}", e),
        }
    }

    pub fn navigate(&mut self, view: View) {
        self.current_view = view;
    }

    pub fn current_view(&self) -> View {
        self.current_view
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn product(&self, id: i64) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn dashboard_stats(&self) -> DashboardStats {
        DashboardStats::from_products(&self.products)
    }

    pub fn is_form_open(&self) -> bool {
        self.show_form
    }

    pub fn editing_id(&self) -> Option<i64> {
        self.editing_id
    }

    pub fn form(&self) -> &ProductForm {
        &self.form
    }

    pub fn set_field(&mut self, field: FormField, value: impl Into<String>) {
        self.form.set(field, value);
    }

    pub fn open_add_form(&mut self) {
        self.form = ProductForm::default();
        self.editing_id = None;
        self.show_form = true;
    }

    pub fn open_edit_form(&mut self, id: i64) -> Result<(), ClientError> {
        let product = self.product(id).ok_or(ClientError::UnknownProduct(id))?;
        self.form = ProductForm::from_product(product);
        self.editing_id = Some(id);
        self.show_form = true;
        Ok(())
    }

    /// 关闭或取消表单：清空字段和编辑标记
    pub fn reset_form(&mut self) {
        self.form = ProductForm::default();
        self.editing_id = None;
        self.show_form = false;
    }

    /// 提交表单。失败时表单保持打开，本地状态不变
    pub async fn submit_form(&mut self) -> Result<Product, ClientError> {
        let saved = match self.editing_id {
            Some(id) => {
                let saved = self
                    .api
                    .update_product(id, &self.form.to_update_request())
                    .await?;
                self.replace_local(id, saved.clone());
                saved
            }
            None => {
                let saved = self
                    .api
                    .create_product(&self.form.to_create_request())
                    .await?;
                self.products.push(saved.clone());
                saved
            }
        };

        self.reset_form();
        Ok(saved)
    }

    /// 删除产品：确认回调返回 false 时不发请求，返回 `Ok(false)`
    pub async fn delete_product<F>(&mut self, id: i64, confirm: F) -> Result<bool, ClientError>
    where
        F: FnOnce(i64) -> bool,
    {
        if !confirm(id) {
            return Ok(false);
        }

        self.api.delete_product(id).await?;
        self.products.retain(|p| p.id != id);
        Ok(true)
    }

    pub async fn adjust_stock(&mut self, id: i64, change: i64) -> Result<Product, ClientError> {
        let updated = self.api.adjust_stock(id, change).await?;
        self.replace_local(id, updated.clone());
        Ok(updated)
    }

    fn replace_local(&mut self, id: i64, product: Product) {
        for p in self.products.iter_mut().filter(|p| p.id == id) {
            *p = product.clone();
        }
    }

    /// 渲染当前视图；库存视图在表单打开时附带表单
    pub fn render(&self) -> String {
        match self.current_view {
            View::Dashboard => view::render_dashboard(&self.products),
            View::Inventory => {
                let mut out = view::render_inventory(&self.products);
                if self.show_form {
                    out.push('\n');
                    out.push_str(&view::render_form(&self.form, self.editing_id));
                }
                out
            }
            other => view::render_placeholder(other),
        }
    }
}

impl<A> fmt::Debug for InventoryApp<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InventoryApp")
            .field("current_view", &self.current_view)
            .field("products", &self.products.len())
            .field("show_form", &self.show_form)
            .field("editing_id", &self.editing_id)
            .finish()
    }
}
