use lib_game::{OBJECT_TYPE_COUNT, base_size};
use macroquad::prelude::*;

static OBJECT_TEXTURES: [&str; OBJECT_TYPE_COUNT] = [
    "assets/object1.png",
    "assets/object2.png",
    "assets/object3.png",
];
static POWERUP_ICON: &str = "assets/snail_rest.png";
static CLOUDS: &str = "assets/background_clouds.png";
static SOLID_SKY: &str = "assets/background_solid_sky.png";

/// The outcome of loading one resource. A missing asset is not an
/// error: whoever draws it falls back to a plain shape.
pub enum Asset<T> {
    Loaded(T),
    Missing,
}

impl<T> Asset<T> {
    pub fn loaded(&self) -> Option<&T> {
        match self {
            Asset::Loaded(x) => Some(x),
            Asset::Missing => None,
        }
    }
}

async fn load_texture_asset(path: &str) -> Asset<Texture2D> {
    match load_texture(path).await {
        Ok(texture) => {
            info!("Loaded {path}");
            Asset::Loaded(texture)
        }
        Err(e) => {
            warn!("Failed to load {path}: {e:?}");
            Asset::Missing
        }
    }
}

pub struct Assets {
    pub objects: [Asset<Texture2D>; OBJECT_TYPE_COUNT],
    pub powerup_icon: Asset<Texture2D>,
    pub clouds: Asset<Texture2D>,
    pub solid_sky: Asset<Texture2D>,
}

impl Assets {
    /// Tries every asset exactly once.
    pub async fn load() -> Self {
        let mut objects: [Asset<Texture2D>; OBJECT_TYPE_COUNT] =
            std::array::from_fn(|_| Asset::Missing);
        for (slot, path) in objects.iter_mut().zip(OBJECT_TEXTURES) {
            *slot = load_texture_asset(path).await;
        }

        Self {
            objects,
            powerup_icon: load_texture_asset(POWERUP_ICON).await,
            clouds: load_texture_asset(CLOUDS).await,
            solid_sky: load_texture_asset(SOLID_SKY).await,
        }
    }

    /// The natural side of every object type.
    pub fn object_base_sizes(&self) -> [u32; OBJECT_TYPE_COUNT] {
        std::array::from_fn(|ty| base_size(self.objects[ty].loaded().map(|t| t.width())))
    }
}
