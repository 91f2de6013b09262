//! Regroupement des catégories du formulaire vers celles vues à l'entraînement.

use rent_schema::{District, HousingType, Laundry, Parking, PetPolicy};

pub fn laundry_group(laundry: Laundry) -> &'static str {
    match laundry {
        Laundry::InUnit => "in-unit",
        Laundry::OnSite | Laundry::NoLaundry => "not in-unit",
    }
}

pub fn pet_group(pets: PetPolicy) -> &'static str {
    match pets {
        PetPolicy::Both | PetPolicy::Dogs => "allows_dogs",
        PetPolicy::Cats | PetPolicy::NoPets => "no_dogs",
    }
}

pub fn housing_group(housing: HousingType) -> &'static str {
    match housing {
        HousingType::Single => "single",
        HousingType::Double | HousingType::Multi => "multi",
    }
}

/// Les catégories de stationnement ont été gardées telles quelles à l'entraînement.
pub fn parking_group(parking: Parking) -> &'static str {
    parking.as_str()
}

pub fn district_area(district: District) -> &'static str {
    match district.get() {
        1 => "west",
        2 | 3 | 10 => "southwest",
        4..=6 => "central",
        7 => "marina",
        8 => "north beach",
        9 => "FiDi/SOMA",
        // District garantit 1..=10
        _ => "west",
    }
}
