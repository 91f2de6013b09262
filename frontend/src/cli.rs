//! Binaire `rent-predict` : les options passent telles quelles par le formulaire.

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use log::debug;
use rent_schema::{District, HousingType, Laundry, Parking, PetPolicy};

use crate::client::{HttpPredictionClient, PredictionClient};
use crate::config;
use crate::form::Field;
use crate::view::{FormView, NotificationVariant, SubmitOutcome};

#[derive(Debug, Parser)]
#[command(
    name = "rent-predict",
    version,
    about = "San Francisco rental price predictor",
    long_about = "San Francisco rental price predictor.\n\n\
                  Numeric values are read like a browser number field: the leading number \
                  is used and anything unreadable counts as 0."
)]
pub struct Cli {
    #[arg(long, env = "BACKEND_URL", help = "Prediction service origin, e.g. https://rent-api.example.com")]
    backend_url: Option<String>,

    #[arg(long, allow_hyphen_values = true, help = "Area in square feet (at least 100)")]
    sqft: Option<String>,

    #[arg(long, allow_hyphen_values = true, help = "Number of bedrooms")]
    beds: Option<String>,

    #[arg(long, allow_hyphen_values = true, help = "Number of bathrooms")]
    bath: Option<String>,

    #[arg(long, help = "Laundry type, e.g. \"(a) in-unit\" or \"on-site\"")]
    laundry: Option<String>,

    #[arg(long, help = "Pet policy, e.g. \"(b) dogs\" or \"no pets\"")]
    pets: Option<String>,

    #[arg(long, help = "Housing type, e.g. \"(a) single\" or \"multi\"")]
    housing_type: Option<String>,

    #[arg(long, help = "Parking, e.g. \"(b) protected\" or \"off-street\"")]
    parking: Option<String>,

    #[arg(long, help = "District number, 1 to 10")]
    district: Option<String>,

    #[arg(long, help = "Print every accepted value for the choice fields and exit")]
    list_options: bool,
}

impl Cli {
    /// Saisies brutes, dans l'ordre du formulaire.
    pub fn inputs(&self) -> Vec<(Field, &str)> {
        [
            (Field::Sqft, &self.sqft),
            (Field::Beds, &self.beds),
            (Field::Bath, &self.bath),
            (Field::Laundry, &self.laundry),
            (Field::Pets, &self.pets),
            (Field::HousingType, &self.housing_type),
            (Field::Parking, &self.parking),
            (Field::District, &self.district),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.as_deref().map(|v| (field, v)))
        .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Success,
    Failure,
}

impl From<Status> for ExitCode {
    fn from(status: Status) -> Self {
        match status {
            Status::Success => ExitCode::SUCCESS,
            Status::Failure => ExitCode::FAILURE,
        }
    }
}

pub async fn run(cli: &Cli) -> anyhow::Result<Status> {
    run_with(cli, HttpPredictionClient::new).await
}

/// `connect` reçoit l'origine du service ; il n'est pas appelé pour `--list-options`.
pub async fn run_with<C, F>(cli: &Cli, connect: F) -> anyhow::Result<Status>
where
    C: PredictionClient,
    F: FnOnce(&str) -> C,
{
    if cli.list_options {
        print_options();
        return Ok(Status::Success);
    }

    let origin = config::backend_origin(cli.backend_url.as_deref());
    debug!("Backend origin: {}", origin);

    let view = FormView::new(connect(&origin));
    for (field, raw) in cli.inputs() {
        view.set_field(field, raw)
            .with_context(|| format!("invalid value for {}", field.label()))?;
    }

    let outcome = view.submit().await;

    for notification in view.take_notifications() {
        let marker = match notification.variant {
            NotificationVariant::Default => "✅",
            NotificationVariant::Destructive => "❌",
        };
        println!("{marker} {}: {}", notification.title, notification.description);
    }

    match outcome {
        SubmitOutcome::Predicted(_) => {
            if let Some(rent) = view.rendered_prediction() {
                println!("Predicted Monthly Rent: {rent}");
            }
            Ok(Status::Success)
        }
        SubmitOutcome::Invalid(_) | SubmitOutcome::Failed(_) | SubmitOutcome::Busy => {
            if let Some(error) = view.error() {
                eprintln!("⚠️  {error}");
            }
            Ok(Status::Failure)
        }
    }
}

pub fn print_options() {
    fn section<T: Copy + std::fmt::Display>(title: &str, options: &[T], label: impl Fn(T) -> &'static str) {
        println!("{title}:");
        for option in options {
            println!("  {:<18} {}", option.to_string(), label(*option));
        }
    }

    section(Field::Laundry.label(), Laundry::ALL, Laundry::label);
    section(Field::Pets.label(), PetPolicy::ALL, PetPolicy::label);
    section(Field::HousingType.label(), HousingType::ALL, HousingType::label);
    section(Field::Parking.label(), Parking::ALL, Parking::label);

    println!("{}:", Field::District.label());
    let districts: Vec<String> = District::all().map(|d| d.to_string()).collect();
    println!("  {}", districts.join(", "));
}
