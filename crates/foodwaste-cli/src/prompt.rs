//! Interactive search menu.

use std::fmt;

use foodwaste_core::{SearchRequest, ValidationError, DEFAULT_RADIUS_KM};
use inquire::validator::Validation;
use inquire::{InquireError, Select, Text};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MenuChoice {
    Zip,
    Coordinates,
    StoreId,
    Quit,
}

impl MenuChoice {
    pub(crate) const ALL: [Self; 4] = [Self::Zip, Self::Coordinates, Self::StoreId, Self::Quit];
}

impl fmt::Display for MenuChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Zip => "Postnummer",
            Self::Coordinates => "Koordinater (bredde, længde, radius)",
            Self::StoreId => "Butiks-ID",
            Self::Quit => "Afslut",
        };
        f.write_str(label)
    }
}

fn validation_result(result: Result<(), ValidationError>) -> Validation {
    match result {
        Ok(()) => Validation::Valid,
        Err(err) => Validation::Invalid(err.to_string().into()),
    }
}

fn check_latitude(input: &str) -> Validation {
    validation_result(SearchRequest::parse_coordinates(input, "0", None).map(|_| ()))
}

fn check_longitude(input: &str) -> Validation {
    validation_result(SearchRequest::parse_coordinates("0", input, None).map(|_| ()))
}

fn check_radius(input: &str) -> Validation {
    validation_result(SearchRequest::parse_coordinates("0", "0", Some(input)).map(|_| ()))
}

/// Shows the menu and prompts for the chosen mode's parameters.
///
/// Returns `Ok(None)` when the user picks "Afslut" or presses Esc/Ctrl-C.
///
/// # Errors
///
/// Returns an error if the terminal cannot be driven, or if the final
/// parameters fail validation.
pub(crate) fn prompt_search() -> anyhow::Result<Option<SearchRequest>> {
    match ask_search() {
        Ok(request) => Ok(request),
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(None),
        Err(err) => Err(err.into()),
    }
}

fn ask_search() -> Result<Option<SearchRequest>, InquireError> {
    let choice = Select::new("Hvordan vil du søge?", MenuChoice::ALL.to_vec()).prompt()?;

    let request = match choice {
        MenuChoice::Quit => return Ok(None),
        MenuChoice::Zip => {
            let zip = Text::new("Postnummer:")
                .with_validator(|s: &str| {
                    Ok(validation_result(SearchRequest::zip(s).map(|_| ())))
                })
                .prompt()?;
            SearchRequest::zip(&zip)
        }
        MenuChoice::Coordinates => {
            let lat = Text::new("Breddegrad:")
                .with_help_message("f.eks. 55.676")
                .with_validator(|s: &str| Ok(check_latitude(s)))
                .prompt()?;
            let lon = Text::new("Længdegrad:")
                .with_help_message("f.eks. 12.568")
                .with_validator(|s: &str| Ok(check_longitude(s)))
                .prompt()?;
            let default_radius = DEFAULT_RADIUS_KM.to_string();
            let radius = Text::new("Radius i km:")
                .with_default(&default_radius)
                .with_validator(|s: &str| Ok(check_radius(s)))
                .prompt()?;
            SearchRequest::parse_coordinates(&lat, &lon, Some(&radius))
        }
        MenuChoice::StoreId => {
            let id = Text::new("Butiks-ID:")
                .with_validator(|s: &str| {
                    Ok(validation_result(SearchRequest::store_id(s).map(|_| ())))
                })
                .prompt()?;
            SearchRequest::store_id(&id)
        }
    };

    // The validators above already accepted the input.
    request
        .map(Some)
        .map_err(|err| InquireError::Custom(Box::new(err)))
}
