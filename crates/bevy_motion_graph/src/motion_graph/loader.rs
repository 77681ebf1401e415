use bevy::asset::{AssetLoader, LoadContext, io::Reader};
use bevy::reflect::TypePath;

use super::MotionGraph;
use crate::errors::AssetLoaderError;

#[derive(Default, TypePath)]
pub struct MotionGraphLoader;

impl AssetLoader for MotionGraphLoader {
    type Asset = MotionGraph;
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
        let src = String::from_utf8_lossy(&bytes);

        Ok(MotionGraph::from_graph_text(&src)?)
    }

    fn extensions(&self) -> &[&str] {
        &["mograph.txt"]
    }
}
