use chrono::Utc;

use shared::MilkSale;

use crate::domain::record_list::{
    CollectionRecord, CollectionSpec, Draft, IdStrategy, InsertPosition, ValidationError,
};
use crate::domain::records::{parse_date, parse_number};

/// Raw milk-sale form input.
#[derive(Debug, Clone, Default)]
pub struct MilkSaleDraft {
    pub sale_date: String,
    pub buyer: String,
    pub quantity_liters: String,
    pub price_per_liter: String,
    pub notes: String,
}

impl Draft for MilkSaleDraft {
    fn field(&self, name: &str) -> Option<&str> {
        match name {
            "saleDate" => Some(&self.sale_date),
            "buyer" => Some(&self.buyer),
            "quantityLiters" => Some(&self.quantity_liters),
            "pricePerLiter" => Some(&self.price_per_liter),
            "notes" => Some(&self.notes),
            _ => None,
        }
    }
}

impl CollectionRecord for MilkSale {
    type Draft = MilkSaleDraft;

    const SPEC: CollectionSpec = CollectionSpec {
        store_key: "milk_sales",
        id_strategy: IdStrategy::Sequential,
        insert: InsertPosition::Back,
        required: &["saleDate", "buyer", "quantityLiters", "pricePerLiter"],
    };

    fn id(&self) -> u64 {
        self.id
    }

    fn from_draft(id: u64, draft: &Self::Draft) -> Result<Self, ValidationError> {
        Ok(MilkSale {
            id,
            sale_date: parse_date("saleDate", &draft.sale_date)?,
            buyer: draft.buyer.trim().to_string(),
            quantity_liters: parse_number("quantityLiters", &draft.quantity_liters)?,
            price_per_liter: parse_number("pricePerLiter", &draft.price_per_liter)?,
            notes: draft.notes.trim().to_string(),
            created_date: Utc::now().date_naive(),
        })
    }

    fn carry_forward(&mut self, previous: &Self) {
        self.created_date = previous.created_date;
    }

    fn search_text(&self) -> Vec<&str> {
        vec![&self.buyer, &self.notes]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_draft_parses_quantities() {
        let draft = MilkSaleDraft {
            sale_date: "2025-02-01".to_string(),
            buyer: "Valley Dairy Co-op".to_string(),
            quantity_liters: "120.5".to_string(),
            price_per_liter: "0.55".to_string(),
            notes: String::new(),
        };

        let sale = MilkSale::from_draft(1, &draft).unwrap();
        assert_eq!(sale.quantity_liters, 120.5);
        assert!((sale.total() - 66.275).abs() < 1e-9);
    }
}
