//! Egg resource.

use chrono::{DateTime, Utc};

use crate::rest::resource::panel_resource;
use crate::rest::Fields;

panel_resource! {
    /// A server template inside a nest.
    Egg => EggAttributes {
        /// Egg ID.
        id: u64,
        /// Egg UUID.
        uuid: String,
        /// Display name.
        name: String,
        /// Owning nest ID.
        nest: u64,
        /// Author email.
        author: String,
        /// Description.
        description: String,
        /// Default docker image.
        docker_image: String,
        /// Selectable docker images, display name to image.
        docker_images: Fields,
        /// Daemon configuration (files, startup, stop, logs).
        config: Fields,
        /// Startup command template.
        startup: String,
        /// Installation script settings.
        script: Fields,
        /// Creation time.
        created_at: DateTime<Utc>,
        /// Last update time.
        updated_at: DateTime<Utc>,
        /// Included relations (`nest`, `servers`, `variables`, `config`, `script`).
        relationships: Fields,
    }
}
