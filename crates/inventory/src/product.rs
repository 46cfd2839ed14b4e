use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use estoque_core::{DomainError, DomainResult, ProductId};

/// Inventory record as persisted and as served on the wire.
///
/// Field names follow the external contract (`nome`, `categoria`, ...);
/// invariants: quantity never negative, price positive, name and category
/// non-empty after trimming.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "categoria")]
    pub category: String,
    #[serde(rename = "preco_unitario")]
    pub unit_price: f64,
    #[serde(rename = "quantidade")]
    pub quantity: i64,
}

/// Validated input for product creation.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub category: String,
    pub unit_price: f64,
    pub initial_quantity: i64,
}

const REQUIRED_FIELDS: [&str; 4] = ["nome", "categoria", "preco_unitario", "quantidade_inicial"];

impl NewProduct {
    /// Validate a client-submitted JSON body.
    ///
    /// Field presence is checked before field contents, so a body missing
    /// several fields reports the first missing one.
    pub fn parse(body: &JsonValue) -> DomainResult<Self> {
        for field in REQUIRED_FIELDS {
            if body.get(field).is_none() {
                return Err(DomainError::validation(format!("Campo '{field}' é obrigatório.")));
            }
        }

        Ok(Self {
            name: parse_text(&body["nome"], "nome")?,
            category: parse_text(&body["categoria"], "categoria")?,
            unit_price: parse_price(&body["preco_unitario"])?,
            initial_quantity: parse_initial_quantity(&body["quantidade_inicial"])?,
        })
    }
}

/// Partial update over the mutable product fields (quantity is only ever
/// changed through stock movements).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub category: Option<String>,
    pub unit_price: Option<f64>,
}

impl ProductPatch {
    /// Validate a client-submitted partial body.
    ///
    /// Only the recognized fields are picked up; present fields must satisfy
    /// the same rules as creation. Unknown fields are ignored.
    pub fn parse(body: &JsonValue) -> DomainResult<Self> {
        let mut patch = Self::default();
        if let Some(value) = body.get("nome") {
            patch.name = Some(parse_text(value, "nome")?);
        }
        if let Some(value) = body.get("categoria") {
            patch.category = Some(parse_text(value, "categoria")?);
        }
        if let Some(value) = body.get("preco_unitario") {
            patch.unit_price = Some(parse_price(value)?);
        }
        Ok(patch)
    }

    /// True when no recognized field was submitted.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.category.is_none() && self.unit_price.is_none()
    }
}

/// Optional substring filters for the product listing.
///
/// Empty strings count as "no filter", matching the query-string contract
/// where `?nome=&categoria=` returns everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductFilter {
    pub name: Option<String>,
    pub category: Option<String>,
}

impl ProductFilter {
    pub fn new(name: Option<String>, category: Option<String>) -> Self {
        Self {
            name: name.filter(|s| !s.is_empty()),
            category: category.filter(|s| !s.is_empty()),
        }
    }
}

fn parse_text(value: &JsonValue, field: &str) -> DomainResult<String> {
    match value.as_str() {
        Some(s) if !s.trim().is_empty() => Ok(s.trim().to_string()),
        _ => Err(DomainError::validation(format!("O campo '{field}' não pode ser vazio."))),
    }
}

fn parse_price(value: &JsonValue) -> DomainResult<f64> {
    match value.as_f64() {
        Some(price) if price > 0.0 => Ok(price),
        _ => Err(DomainError::validation("O preço unitário deve ser um número positivo.")),
    }
}

fn parse_initial_quantity(value: &JsonValue) -> DomainResult<i64> {
    match value.as_i64() {
        Some(quantity) if quantity >= 0 => Ok(quantity),
        _ => Err(DomainError::validation(
            "A quantidade inicial deve ser um número inteiro maior ou igual a zero.",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_body() -> JsonValue {
        json!({
            "nome": "SSD 1TB",
            "categoria": "Armazenamento",
            "preco_unitario": 450,
            "quantidade_inicial": 5,
        })
    }

    #[test]
    fn parse_accepts_a_complete_body_and_trims_text() {
        let mut body = valid_body();
        body["nome"] = json!("  SSD 1TB  ");

        let new = NewProduct::parse(&body).unwrap();
        assert_eq!(new.name, "SSD 1TB");
        assert_eq!(new.category, "Armazenamento");
        assert_eq!(new.unit_price, 450.0);
        assert_eq!(new.initial_quantity, 5);
    }

    #[test]
    fn parse_reports_the_missing_field_by_name() {
        let mut body = valid_body();
        body.as_object_mut().unwrap().remove("categoria");

        let err = NewProduct::parse(&body).unwrap_err();
        assert_eq!(
            err,
            DomainError::validation("Campo 'categoria' é obrigatório.")
        );
    }

    #[test]
    fn parse_rejects_blank_name() {
        let mut body = valid_body();
        body["nome"] = json!("   ");

        let err = NewProduct::parse(&body).unwrap_err();
        assert_eq!(err, DomainError::validation("O campo 'nome' não pode ser vazio."));
    }

    #[test]
    fn parse_rejects_non_string_category() {
        let mut body = valid_body();
        body["categoria"] = json!(7);

        let err = NewProduct::parse(&body).unwrap_err();
        assert_eq!(
            err,
            DomainError::validation("O campo 'categoria' não pode ser vazio.")
        );
    }

    #[test]
    fn parse_rejects_non_positive_price() {
        for price in [json!(0), json!(-20.0), json!("450")] {
            let mut body = valid_body();
            body["preco_unitario"] = price;

            let err = NewProduct::parse(&body).unwrap_err();
            assert_eq!(
                err,
                DomainError::validation("O preço unitário deve ser um número positivo.")
            );
        }
    }

    #[test]
    fn parse_rejects_fractional_or_negative_quantity() {
        for quantity in [json!(2.5), json!(-1), json!("5")] {
            let mut body = valid_body();
            body["quantidade_inicial"] = quantity;

            let err = NewProduct::parse(&body).unwrap_err();
            assert_eq!(
                err,
                DomainError::validation(
                    "A quantidade inicial deve ser um número inteiro maior ou igual a zero."
                )
            );
        }
    }

    #[test]
    fn parse_accepts_zero_initial_quantity() {
        let mut body = valid_body();
        body["quantidade_inicial"] = json!(0);

        assert_eq!(NewProduct::parse(&body).unwrap().initial_quantity, 0);
    }

    #[test]
    fn patch_picks_up_only_recognized_fields() {
        let patch = ProductPatch::parse(&json!({
            "nome": "Headset Gamer Pro",
            "preco_unitario": 175.5,
            "quantidade": 99,
        }))
        .unwrap();

        assert_eq!(patch.name.as_deref(), Some("Headset Gamer Pro"));
        assert_eq!(patch.category, None);
        assert_eq!(patch.unit_price, Some(175.5));
    }

    #[test]
    fn patch_with_no_recognized_field_is_empty() {
        let patch = ProductPatch::parse(&json!({ "quantidade": 10 })).unwrap();
        assert!(patch.is_empty());
    }

    #[test]
    fn patch_rejects_blank_name() {
        let err = ProductPatch::parse(&json!({ "nome": "" })).unwrap_err();
        assert_eq!(err, DomainError::validation("O campo 'nome' não pode ser vazio."));
    }

    #[test]
    fn patch_rejects_non_positive_price() {
        let err = ProductPatch::parse(&json!({ "preco_unitario": -1 })).unwrap_err();
        assert_eq!(
            err,
            DomainError::validation("O preço unitário deve ser um número positivo.")
        );
    }

    #[test]
    fn filter_treats_empty_strings_as_absent() {
        let filter = ProductFilter::new(Some(String::new()), Some("Móveis".to_string()));
        assert_eq!(filter.name, None);
        assert_eq!(filter.category.as_deref(), Some("Móveis"));
    }
}
