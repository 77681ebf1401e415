use bevy::{
    app::{App, Plugin},
    asset::AssetApp,
};

use crate::{
    error_map::FramePair,
    motion_clip::{MotionClip, loader::MotionClipLoader},
    motion_graph::{
        Edge, GraphCursor, MotionGraph, MotionInfo, Node, NodeId, loader::MotionGraphLoader,
    },
};

/// Adds motion graph support to an app: registers the [`MotionClip`] and
/// [`MotionGraph`] assets, their loaders, and the reflected types.
pub struct MotionGraphPlugin;

impl Plugin for MotionGraphPlugin {
    fn build(&self, app: &mut App) {
        app.init_asset::<MotionClip>()
            .init_asset_loader::<MotionClipLoader>()
            .register_asset_reflect::<MotionClip>();
        app.init_asset::<MotionGraph>()
            .init_asset_loader::<MotionGraphLoader>()
            .register_asset_reflect::<MotionGraph>();

        app.register_type::<NodeId>()
            .register_type::<Node>()
            .register_type::<Edge>()
            .register_type::<MotionInfo>()
            .register_type::<GraphCursor>()
            .register_type::<FramePair>();
    }
}
