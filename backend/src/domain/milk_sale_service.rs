use anyhow::Result;
use log::info;
use std::sync::Arc;

use shared::{MilkSale, PageRequest, PaginationInfo, RecordFilter};

use crate::domain::record_list::{paginate, RecordList};
use crate::domain::records::milk_sales::MilkSaleDraft;
use crate::storage::KeyValueStore;

#[derive(Debug, Clone, PartialEq)]
pub struct MilkSaleListResult {
    pub sales: Vec<MilkSale>,
    pub pagination: PaginationInfo,
}

/// Service for managing milk sales.
pub struct MilkSaleService<S: KeyValueStore> {
    sales: RecordList<MilkSale, S>,
}

impl<S: KeyValueStore> MilkSaleService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self {
            sales: RecordList::new(store),
        }
    }

    pub fn record_sale(&mut self, draft: MilkSaleDraft) -> Result<MilkSale> {
        info!("Recording milk sale to {}", draft.buyer);
        let sale = self.sales.create(&draft)?;
        info!("Recorded sale {} for {:.2}", sale.id, sale.total());
        Ok(sale)
    }

    pub fn update_sale(&mut self, id: u64, draft: MilkSaleDraft) -> Result<Option<MilkSale>> {
        info!("Updating milk sale: {}", id);
        self.sales.update(id, &draft)
    }

    pub fn delete_sale(&mut self, id: u64) -> Result<bool> {
        info!("Deleting milk sale: {}", id);
        self.sales.remove(id)
    }

    pub fn sales(&self) -> &[MilkSale] {
        self.sales.records()
    }

    /// Sum of `quantity × price` across all recorded sales.
    pub fn total_revenue(&self) -> f64 {
        self.sales.records().iter().map(|s| s.total()).sum()
    }

    pub fn list_sales(&self, filter: &RecordFilter, page: &PageRequest) -> MilkSaleListResult {
        let matching = self.sales.filtered(filter);
        let (slice, pagination) = paginate(&matching, page);
        MilkSaleListResult {
            sales: slice.iter().map(|s| (*s).clone()).collect(),
            pagination,
        }
    }

    /// Export every sale as CSV, most suitable for a spreadsheet hand-off.
    pub fn export_csv(&self) -> String {
        let mut csv = String::from("id,saleDate,buyer,quantityLiters,pricePerLiter,total,notes\n");
        for sale in self.sales.records() {
            csv.push_str(&format!(
                "{},{},\"{}\",{},{},{:.2},\"{}\"\n",
                sale.id,
                sale.sale_date,
                escape_csv(&sale.buyer),
                sale.quantity_liters,
                sale.price_per_liter,
                sale.total(),
                escape_csv(&sale.notes),
            ));
        }
        csv
    }
}

fn escape_csv(value: &str) -> String {
    value.replace('"', "\"\"")
}
