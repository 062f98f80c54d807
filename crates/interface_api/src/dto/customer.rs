//! Customer DTOs

use serde::Deserialize;
use validator::Validate;

use domain_catalog::CustomerInput;

#[derive(Debug, Deserialize, Validate)]
pub struct CustomerRequest {
    #[validate(required, length(min = 1))]
    pub first_name: Option<String>,
    #[validate(required, length(min = 1))]
    pub last_name: Option<String>,
}

impl CustomerRequest {
    pub fn into_input(self) -> CustomerInput {
        CustomerInput::new(
            self.first_name.unwrap_or_default(),
            self.last_name.unwrap_or_default(),
        )
    }
}
