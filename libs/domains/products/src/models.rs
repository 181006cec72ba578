use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Longest accepted product name, in characters
pub const MAX_NAME_LENGTH: usize = 255;

/// Most digits a price may need when written out in plain notation.
/// Anything within this fits a [`Decimal`] exactly.
pub const MAX_PRICE_DIGITS: usize = 28;

/// Product entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    /// Store-assigned identifier, never reused
    pub id: i64,
    pub name: String,
    /// Exact decimal, rendered as a JSON number
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64, example = 99.99)]
    pub price: Decimal,
    pub stock: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// DTO for creating a new product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateProduct {
    #[validate(length(
        max = 255,
        message = "The name field must not be greater than 255 characters."
    ))]
    #[schema(max_length = 255, example = "Test Product")]
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64, example = 99.99)]
    pub price: Decimal,
    #[schema(example = 10)]
    pub stock: i32,
}

/// DTO for updating an existing product. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateProduct {
    #[validate(length(
        max = 255,
        message = "The name field must not be greater than 255 characters."
    ))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(max_length = 255)]
    pub name: Option<String>,
    #[serde(
        default,
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    #[schema(value_type = Option<f64>)]
    pub price: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock: Option<i32>,
}

impl UpdateProduct {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.price.is_none() && self.stock.is_none()
    }
}

/// Inclusive price bounds for listing. Each bound applies on its own.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProductFilter {
    /// Only products with `price >= min_price`
    #[serde(default, deserialize_with = "lenient_decimal")]
    #[param(value_type = Option<f64>)]
    pub min_price: Option<Decimal>,
    /// Only products with `price <= max_price`
    #[serde(default, deserialize_with = "lenient_decimal")]
    #[param(value_type = Option<f64>)]
    pub max_price: Option<Decimal>,
}

impl ProductFilter {
    pub fn matches(&self, product: &Product) -> bool {
        self.min_price.is_none_or(|min| product.price >= min)
            && self.max_price.is_none_or(|max| product.price <= max)
    }
}

/// Blank or unparsable query values behave as if the bound were absent.
fn lenient_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(|raw| parse_decimal(raw).ok()))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DecimalError {
    /// Not a number at all
    Invalid,
    /// A number needing more than [`MAX_PRICE_DIGITS`] digits written out
    TooManyDigits,
}

/// Plain (`12.50`) or exponent (`1.2e3`) notation, surrounding whitespace ignored.
///
/// Parsing is exact. A value such as `1e29` or `1e-30`, which would need more
/// than [`MAX_PRICE_DIGITS`] digits in plain notation, is rejected instead of
/// being rounded.
pub(crate) fn parse_decimal(raw: &str) -> Result<Decimal, DecimalError> {
    let raw = raw.trim();
    let is_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());

    let (mantissa, exponent) = match raw.split_once(['e', 'E']) {
        Some((mantissa, exponent)) => (mantissa, Some(exponent)),
        None => (raw, None),
    };

    let (negative, unsigned) = match mantissa.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, mantissa.strip_prefix('+').unwrap_or(mantissa)),
    };
    let (int_part, frac_part) = unsigned.split_once('.').unwrap_or((unsigned, ""));
    if (int_part.is_empty() && frac_part.is_empty()) || !is_digits(int_part) || !is_digits(frac_part)
    {
        return Err(DecimalError::Invalid);
    }

    // `None` when the exponent is too large for an i64
    let exponent = match exponent {
        None => Some(0),
        Some(exponent) => {
            let digits = exponent.strip_prefix(['+', '-']).unwrap_or(exponent);
            if digits.is_empty() || !is_digits(digits) {
                return Err(DecimalError::Invalid);
            }
            exponent.parse::<i64>().ok()
        }
    };

    let digits = format!("{int_part}{frac_part}");
    let significant = digits.trim_start_matches('0');
    if significant.is_empty() {
        return Ok(Decimal::ZERO);
    }
    let exponent = exponent.ok_or(DecimalError::TooManyDigits)?;

    // value = trimmed * 10^power
    let trimmed = significant.trim_end_matches('0');
    let trailing_zeros = (significant.len() - trimmed.len()) as i128;
    let power = exponent as i128 - frac_part.len() as i128 + trailing_zeros;

    let len = trimmed.len() as i128;
    let width = if power >= 0 { len + power } else { len.max(-power) };
    if width > MAX_PRICE_DIGITS as i128 {
        return Err(DecimalError::TooManyDigits);
    }

    let mut value: i128 = trimmed.parse().map_err(|_| DecimalError::TooManyDigits)?;
    let scale = if power >= 0 {
        value *= 10_i128.pow(power as u32);
        0
    } else {
        (-power) as u32
    };
    if negative {
        value = -value;
    }

    Decimal::try_from_i128_with_scale(value, scale).map_err(|_| DecimalError::TooManyDigits)
}

impl Product {
    /// Build a product from a create DTO (used by the in-memory store)
    pub fn new(id: i64, input: CreateProduct) -> Self {
        let now = Utc::now();
        Self {
            id,
            name: input.name,
            price: input.price,
            stock: input.stock,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply the supplied fields. Returns whether any stored value changed;
    /// `updated_at` only moves when one did.
    pub fn apply_update(&mut self, update: UpdateProduct) -> bool {
        let mut changed = false;

        if let Some(name) = update.name {
            if name != self.name {
                self.name = name;
                changed = true;
            }
        }
        if let Some(price) = update.price {
            // Decimal equality ignores scale, so 100 and 100.00 are the same price
            if price != self.price {
                self.price = price;
                changed = true;
            }
        }
        if let Some(stock) = update.stock {
            if stock != self.stock {
                self.stock = stock;
                changed = true;
            }
        }

        if changed {
            self.updated_at = Utc::now();
        }
        changed
    }
}

/// Body of create and update responses
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductResponse {
    #[schema(example = "Product created successfully")]
    pub message: String,
    pub product: Product,
}

/// Body of a delete response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = "Product deleted successfully")]
    pub message: String,
}
