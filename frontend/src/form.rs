use std::fmt;
use std::str::FromStr;

use rent_schema::{PredictionRequest, UnknownChoice, ValidationError};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Sqft,
    Beds,
    Bath,
    Laundry,
    Pets,
    HousingType,
    Parking,
    District,
}

impl Field {
    pub const ALL: [Field; 8] = [
        Field::Sqft,
        Field::Beds,
        Field::Bath,
        Field::Laundry,
        Field::Pets,
        Field::HousingType,
        Field::Parking,
        Field::District,
    ];

    /// Clé dans le corps de la requête.
    pub fn name(self) -> &'static str {
        match self {
            Field::Sqft => "sqft",
            Field::Beds => "beds",
            Field::Bath => "bath",
            Field::Laundry => "laundry",
            Field::Pets => "pets",
            Field::HousingType => "housing_type",
            Field::Parking => "parking",
            Field::District => "hood_district",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Field::Sqft => "Area (sq ft)",
            Field::Beds => "Bedrooms",
            Field::Bath => "Bathrooms",
            Field::Laundry => "Laundry Type",
            Field::Pets => "Pet Policy",
            Field::HousingType => "Housing Type",
            Field::Parking => "Parking",
            Field::District => "District (1-10)",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Field {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Field::ALL
            .into_iter()
            .find(|field| field.name() == wanted || (*field == Field::District && wanted == "district"))
            .ok_or_else(|| FormError::UnknownField(wanted.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormError {
    #[error(transparent)]
    Choice(#[from] UnknownChoice),

    #[error(transparent)]
    District(#[from] ValidationError),

    #[error("unknown form field {0:?}")]
    UnknownField(String),
}

/// Applique une saisie brute au formulaire.
///
/// Les champs numériques se comportent comme un `<input type="number">` :
/// préfixe numérique lu, sinon 0. Les listes déroulantes refusent les
/// valeurs inconnues sans modifier l'état.
pub fn apply(form: &mut PredictionRequest, field: Field, raw: &str) -> Result<(), FormError> {
    match field {
        Field::Sqft => form.sqft = parse_int_or_zero(raw),
        Field::Beds => form.beds = parse_int_or_zero(raw),
        Field::Bath => form.bath = parse_float_or_zero(raw),
        Field::Laundry => form.laundry = raw.parse()?,
        Field::Pets => form.pets = raw.parse()?,
        Field::HousingType => form.housing_type = raw.parse()?,
        Field::Parking => form.parking = raw.parse()?,
        Field::District => form.hood_district = raw.parse()?,
    }
    Ok(())
}

/// Entier en tête de `raw` (`"12 sqft"` → 12, `"3.7"` → 3) ; 0 s'il n'y en a pas.
pub fn parse_int_or_zero(raw: &str) -> i64 {
    let text = raw.trim_start();
    let end = numeric_prefix_len(text, false);
    text[..end].parse().unwrap_or(0)
}

/// Nombre décimal en tête de `raw` ; 0 s'il n'y en a pas.
pub fn parse_float_or_zero(raw: &str) -> f64 {
    let text = raw.trim_start();
    let end = numeric_prefix_len(text, true);
    text[..end]
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

fn numeric_prefix_len(text: &str, allow_fraction: bool) -> usize {
    let bytes = text.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut has_digits = end > int_start;

    if allow_fraction && end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        if has_digits || frac_end > frac_start {
            end = frac_end;
            has_digits = true;
        }
    }

    if allow_fraction && has_digits && end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > digits_start {
            end = exp_end;
        }
    }

    if has_digits {
        end
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rent_schema::{Laundry, Parking};

    #[test]
    fn integers_parse_like_a_number_input() {
        assert_eq!(parse_int_or_zero("800"), 800);
        assert_eq!(parse_int_or_zero("  1200 sqft"), 1200);
        assert_eq!(parse_int_or_zero("3.7"), 3);
        assert_eq!(parse_int_or_zero("-2"), -2);
        assert_eq!(parse_int_or_zero("+5"), 5);
        assert_eq!(parse_int_or_zero(""), 0);
        assert_eq!(parse_int_or_zero("abc"), 0);
        assert_eq!(parse_int_or_zero("-"), 0);
    }

    #[test]
    fn floats_parse_like_a_number_input() {
        assert_eq!(parse_float_or_zero("1.5"), 1.5);
        assert_eq!(parse_float_or_zero(".5"), 0.5);
        assert_eq!(parse_float_or_zero("2."), 2.0);
        assert_eq!(parse_float_or_zero("-0.5 baths"), -0.5);
        assert_eq!(parse_float_or_zero("1e1"), 10.0);
        assert_eq!(parse_float_or_zero("1e"), 1.0);
        assert_eq!(parse_float_or_zero("."), 0.0);
        assert_eq!(parse_float_or_zero("NaN"), 0.0);
    }

    #[test]
    fn apply_updates_numeric_fields() {
        let mut form = PredictionRequest::default();
        apply(&mut form, Field::Sqft, "950").unwrap();
        apply(&mut form, Field::Beds, "x").unwrap();
        apply(&mut form, Field::Bath, "1.5").unwrap();
        assert_eq!((form.sqft, form.beds, form.bath), (950, 0, 1.5));
    }

    #[test]
    fn apply_updates_choices() {
        let mut form = PredictionRequest::default();
        apply(&mut form, Field::Laundry, "(c) no laundry").unwrap();
        apply(&mut form, Field::Parking, "off-street").unwrap();
        apply(&mut form, Field::District, "9").unwrap();
        assert_eq!(form.laundry, Laundry::NoLaundry);
        assert_eq!(form.parking, Parking::OffStreet);
        assert_eq!(form.hood_district.get(), 9);
    }

    #[test]
    fn invalid_choice_leaves_form_unchanged() {
        let mut form = PredictionRequest::default();
        assert!(matches!(
            apply(&mut form, Field::Pets, "hamsters"),
            Err(FormError::Choice(_))
        ));
        assert!(matches!(
            apply(&mut form, Field::District, "12"),
            Err(FormError::District(_))
        ));
        assert_eq!(form, PredictionRequest::default());
    }

    #[test]
    fn fields_parse_from_wire_names() {
        assert_eq!("housing_type".parse::<Field>().unwrap(), Field::HousingType);
        assert_eq!("district".parse::<Field>().unwrap(), Field::District);
        assert_eq!("hood_district".parse::<Field>().unwrap(), Field::District);
        assert!("garden".parse::<Field>().is_err());
    }
}
