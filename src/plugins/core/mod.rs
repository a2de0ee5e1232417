//! Core plugin: shared resources and global settings.

use bevy::prelude::*;

use crate::common::diagnostics::ReportedIssues;
use crate::common::tunables::Tunables;

pub fn plugin(app: &mut App) {
    app.init_resource::<Tunables>();
    app.init_resource::<ReportedIssues>();
    app.insert_resource(ClearColor(Color::srgb(0.05, 0.05, 0.07)));
}
