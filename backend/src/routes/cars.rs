use serde::{Deserialize, Serialize};

/// Acknowledgement returned after a vehicle is deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CarRemoved {
    pub message: String,
}

impl CarRemoved {
    pub fn new() -> Self {
        Self {
            message: "Car removed successfully".to_string(),
        }
    }
}

impl Default for CarRemoved {
    fn default() -> Self {
        Self::new()
    }
}

pub const LIST_CARS: &str = "list_cars";
pub const GET_CAR: &str = "get_car";
pub const CREATE_CAR: &str = "create_car";
pub const UPDATE_CAR: &str = "update_car";
pub const DELETE_CAR: &str = "delete_car";
