use rust_decimal::Decimal;
use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::IntoActiveModel;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Sea-ORM Entity for the products table
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub price: Decimal,
    pub stock: i32,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for crate::models::Product {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            price: model.price,
            stock: model.stock,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

// The id comes from the bigserial sequence
impl From<crate::models::CreateProduct> for ActiveModel {
    fn from(input: crate::models::CreateProduct) -> Self {
        let now = chrono::Utc::now();

        ActiveModel {
            id: NotSet,
            name: Set(input.name),
            price: Set(input.price),
            stock: Set(input.stock),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        }
    }
}

impl Model {
    /// Active model that sets only the supplied fields whose value differs
    /// from this row, plus `updated_at`. `None` when nothing would change.
    pub fn changes(&self, update: crate::models::UpdateProduct) -> Option<ActiveModel> {
        let mut active = self.clone().into_active_model();
        let mut changed = false;

        if let Some(name) = update.name {
            if name != self.name {
                active.name = Set(name);
                changed = true;
            }
        }
        // Decimal equality ignores scale, so 100 and 100.00 are the same price
        if let Some(price) = update.price {
            if price != self.price {
                active.price = Set(price);
                changed = true;
            }
        }
        if let Some(stock) = update.stock {
            if stock != self.stock {
                active.stock = Set(stock);
                changed = true;
            }
        }

        if !changed {
            return None;
        }
        active.updated_at = Set(chrono::Utc::now().into());
        Some(active)
    }
}
