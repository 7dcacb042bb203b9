//! Startup data: the demo catalog and the administrator account.

use log::info;

use super::repository::{
    CatalogRepository, ErrorContext, FullRepository, RepositoryError, RepositoryResult,
    UserRepository,
};
use crate::api::NewCar;
use crate::services::auth::hash_password;

pub const ADMIN_USERNAME: &str = "admin";
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

/// The three cars every fresh deployment starts with.
pub fn default_catalog() -> Vec<NewCar> {
    [
        (
            "Civic",
            "Honda",
            "photo-1618843479313-40f8afb4b4d8",
            "Prata",
            120000.0,
        ),
        (
            "Corolla",
            "Toyota",
            "photo-1550355291-bbee04a92027",
            "Branco",
            110000.0,
        ),
        (
            "Focus",
            "Ford",
            "photo-1583121274602-3e2820c69888",
            "Azul",
            95000.0,
        ),
    ]
    .into_iter()
    .map(|(model, brand, photo, color, price)| NewCar {
        model: model.to_string(),
        brand: brand.to_string(),
        image_url: format!(
            "https://images.unsplash.com/{}?ixlib=rb-4.0.3&auto=format&fit=crop&w=800&q=80",
            photo
        ),
        images: Vec::new(),
        color: color.to_string(),
        price,
    })
    .collect()
}

/// Insert the demo catalog and the admin user into an empty repository.
///
/// Each collection is only seeded when it is empty, so calling this twice is
/// harmless.
pub async fn seed_defaults(repo: &dyn FullRepository, admin_password: &str) -> RepositoryResult<()> {
    if repo.list_cars().await?.is_empty() {
        for car in default_catalog() {
            repo.insert_car(car).await?;
        }
        info!("Seeded demo catalog");
    }

    if repo.find_user_by_username(ADMIN_USERNAME).await?.is_none() {
        let hash = hash_password(admin_password).map_err(|e| {
            RepositoryError::internal_with_context(
                e.to_string(),
                ErrorContext::new("seed_defaults").with_entity("user"),
            )
        })?;
        let admin = repo.insert_user(ADMIN_USERNAME.to_string(), hash).await?;
        info!("Seeded admin user with id {}", admin.id);
    }

    Ok(())
}
