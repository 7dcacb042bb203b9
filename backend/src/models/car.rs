//! Catalog vehicle types.
//!
//! Field names on the wire follow the catalog frontend (`modelo`, `marca`,
//! `imagemUrl`, ...), while the Rust side uses plain English names.

use serde::{Deserialize, Serialize};

use crate::api::CarId;

/// A vehicle listed in the catalog.
///
/// `brand` is the grouping category for analytics and `price` is the numeric
/// attribute averaged across the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Car {
    pub id: CarId,
    #[serde(rename = "modelo")]
    pub model: String,
    #[serde(rename = "marca")]
    pub brand: String,
    #[serde(rename = "imagemUrl")]
    pub image_url: String,
    /// Optional gallery; the main image is always `image_url`.
    #[serde(rename = "imagens", default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<String>,
    #[serde(rename = "cor")]
    pub color: String,
    #[serde(rename = "valor")]
    pub price: f64,
}

/// Payload for creating a vehicle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewCar {
    #[serde(rename = "modelo")]
    pub model: String,
    #[serde(rename = "marca")]
    pub brand: String,
    #[serde(rename = "imagemUrl")]
    pub image_url: String,
    #[serde(rename = "imagens", default)]
    pub images: Vec<String>,
    #[serde(rename = "cor")]
    pub color: String,
    #[serde(rename = "valor")]
    pub price: f64,
}

/// Partial update payload; absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CarUpdate {
    #[serde(rename = "modelo", default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(rename = "marca", default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(rename = "imagemUrl", default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(rename = "imagens", default, skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
    #[serde(rename = "cor", default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(rename = "valor", default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
}

impl NewCar {
    /// Check the payload before it reaches the catalog.
    ///
    /// Returns the first violated rule as a human-readable message.
    pub fn validate(&self) -> Result<(), String> {
        require_non_empty("modelo", &self.model)?;
        require_non_empty("marca", &self.brand)?;
        require_http_url("imagemUrl", &self.image_url)?;
        for image in &self.images {
            require_http_url("imagens", image)?;
        }
        require_non_empty("cor", &self.color)?;
        require_price(self.price)
    }

    /// Materialize the payload as a catalog entry with the given id.
    pub fn into_car(self, id: CarId) -> Car {
        Car {
            id,
            model: self.model,
            brand: self.brand,
            image_url: self.image_url,
            images: self.images,
            color: self.color,
            price: self.price,
        }
    }
}

impl CarUpdate {
    /// Validate only the fields that are present. An update that sets no
    /// field at all is rejected.
    pub fn validate(&self) -> Result<(), String> {
        if self.is_empty() {
            return Err("update must set at least one field".to_string());
        }
        if let Some(model) = &self.model {
            require_non_empty("modelo", model)?;
        }
        if let Some(brand) = &self.brand {
            require_non_empty("marca", brand)?;
        }
        if let Some(url) = &self.image_url {
            require_http_url("imagemUrl", url)?;
        }
        if let Some(images) = &self.images {
            for image in images {
                require_http_url("imagens", image)?;
            }
        }
        if let Some(color) = &self.color {
            require_non_empty("cor", color)?;
        }
        if let Some(price) = self.price {
            require_price(price)?;
        }
        Ok(())
    }

    /// Merge the present fields into `car`.
    pub fn apply_to(&self, car: &mut Car) {
        if let Some(model) = &self.model {
            car.model = model.clone();
        }
        if let Some(brand) = &self.brand {
            car.brand = brand.clone();
        }
        if let Some(url) = &self.image_url {
            car.image_url = url.clone();
        }
        if let Some(images) = &self.images {
            car.images = images.clone();
        }
        if let Some(color) = &self.color {
            car.color = color.clone();
        }
        if let Some(price) = self.price {
            car.price = price;
        }
    }

    pub fn is_empty(&self) -> bool {
        self == &CarUpdate::default()
    }
}

fn require_non_empty(field: &str, value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("{} must not be empty", field));
    }
    Ok(())
}

fn require_http_url(field: &str, value: &str) -> Result<(), String> {
    match url::Url::parse(value) {
        Ok(url) if matches!(url.scheme(), "http" | "https") && url.has_host() => Ok(()),
        Ok(url) => Err(format!(
            "{} must be an http(s) URL, got scheme '{}'",
            field,
            url.scheme()
        )),
        Err(e) => Err(format!("{} is not a valid URL: {}", field, e)),
    }
}

fn require_price(price: f64) -> Result<(), String> {
    if !price.is_finite() || price < 0.0 {
        return Err(format!("valor must be a non-negative number, got {}", price));
    }
    Ok(())
}
