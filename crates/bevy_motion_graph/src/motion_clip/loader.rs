use bevy::asset::{AssetLoader, LoadContext, io::Reader};
use bevy::reflect::TypePath;

use super::{MotionClip, serial::MotionClipSerial};
use crate::errors::AssetLoaderError;

#[derive(Default, TypePath)]
pub struct MotionClipLoader;

impl AssetLoader for MotionClipLoader {
    type Asset = MotionClip;
    type Settings = ();
    type Error = AssetLoaderError;

    async fn load(
        &self,
        reader: &mut dyn Reader,
        _settings: &Self::Settings,
        _load_context: &mut LoadContext<'_>,
    ) -> Result<Self::Asset, Self::Error> {
        let mut bytes = vec![];
        reader.read_to_end(&mut bytes).await?;
        let serial: MotionClipSerial = ron::de::from_bytes(&bytes)?;

        Ok(serial.into())
    }

    fn extensions(&self) -> &[&str] {
        &["clip.ron"]
    }
}
