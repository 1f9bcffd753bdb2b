// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! JSON snapshots of a document.
//!
//! Element ids are not stable across processes, so snapshots reference levels
//! and views by name. Loading assigns fresh ids.

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use viewrange_core::{ElementId, PlaneRole, PlaneSetting, ProxyColor, RangeConfiguration, ViewKind};

use crate::document::{Document, NewView, ShapeData};
use crate::error::{Error, Result};

/// Serializable representation of a whole document.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct DocumentSnapshot {
    pub levels: Vec<LevelSnapshot>,
    pub views: Vec<ViewSnapshot>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub shapes: Vec<ShapeSnapshot>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_view: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LevelSnapshot {
    pub name: String,
    pub elevation: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ViewSnapshot {
    pub name: String,
    pub kind: ViewKind,
    #[serde(default)]
    pub template: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discipline: Option<String>,
    /// Name of the level the view was generated from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crop: Option<Vec<[f64; 2]>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<RangeSnapshot>,
}

/// View range with level names; a missing plane is unlimited.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct RangeSnapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top: Option<PlaneSnapshot>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cut: Option<PlaneSnapshot>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bottom: Option<PlaneSnapshot>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub view_depth: Option<PlaneSnapshot>,
}

impl RangeSnapshot {
    fn plane(&self, role: PlaneRole) -> Option<&PlaneSnapshot> {
        match role {
            PlaneRole::Top => self.top.as_ref(),
            PlaneRole::Cut => self.cut.as_ref(),
            PlaneRole::Bottom => self.bottom.as_ref(),
            PlaneRole::ViewDepth => self.view_depth.as_ref(),
        }
    }

    fn set(&mut self, role: PlaneRole, plane: PlaneSnapshot) {
        let slot = match role {
            PlaneRole::Top => &mut self.top,
            PlaneRole::Cut => &mut self.cut,
            PlaneRole::Bottom => &mut self.bottom,
            PlaneRole::ViewDepth => &mut self.view_depth,
        };
        *slot = Some(plane);
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PlaneSnapshot {
    pub level: String,
    pub offset: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ShapeSnapshot {
    pub name: String,
    #[serde(default)]
    pub comment: String,
    pub color: ProxyColor,
    pub vertices: Vec<[f64; 3]>,
    pub triangles: Vec<[u32; 3]>,
}

impl Document {
    /// Loads a document from a JSON snapshot.
    pub fn from_json(json: &str) -> Result<Self> {
        let snapshot: DocumentSnapshot = serde_json::from_str(json)?;
        Self::from_snapshot(snapshot)
    }

    /// Serializes the document to a JSON string.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.to_snapshot())?)
    }

    /// Builds a document from a snapshot, resolving names to fresh ids.
    pub fn from_snapshot(snapshot: DocumentSnapshot) -> Result<Self> {
        let mut doc = Document::new();

        let mut levels: FxHashMap<String, ElementId> = FxHashMap::default();
        for level in snapshot.levels {
            if levels.contains_key(&level.name) {
                return Err(Error::DuplicateName(level.name));
            }
            let id = doc.add_level(level.name.clone(), level.elevation);
            levels.insert(level.name, id);
        }
        let level_id = |name: &str| {
            levels
                .get(name)
                .copied()
                .ok_or_else(|| Error::UnknownLevel(name.to_string()))
        };

        let mut view_names: FxHashSet<String> = FxHashSet::default();
        for view in snapshot.views {
            if !view_names.insert(view.name.clone()) {
                return Err(Error::DuplicateName(view.name));
            }

            let associated_level = view.level.as_deref().map(&level_id).transpose()?;
            let range = match &view.range {
                Some(range) => {
                    let mut configuration = RangeConfiguration::default();
                    for role in PlaneRole::ALL {
                        if let Some(plane) = range.plane(role) {
                            let setting = PlaneSetting::new(level_id(&plane.level)?, plane.offset);
                            configuration.set(role, Some(setting));
                        }
                    }
                    Some(configuration)
                }
                None => None,
            };

            doc.add_view(NewView {
                name: view.name,
                kind: view.kind,
                is_template: view.template,
                discipline: view.discipline,
                associated_level,
                crop: view.crop,
                range,
            });
        }

        for shape in snapshot.shapes {
            doc.insert_shape(ShapeData {
                name: shape.name,
                comment: shape.comment,
                color: shape.color,
                vertices: shape.vertices,
                triangles: shape.triangles,
            });
        }

        if let Some(name) = snapshot.active_view {
            let view = doc
                .view_by_name(&name)
                .ok_or_else(|| Error::UnknownView(name.clone()))?;
            doc.set_active_view(view.id)?;
        }

        Ok(doc)
    }

    /// Creates a serializable snapshot of the document.
    pub fn to_snapshot(&self) -> DocumentSnapshot {
        let level_name = |id: ElementId| {
            self.elements
                .levels
                .get(&id)
                .map(|l| l.name.clone())
                .unwrap_or_else(|| id.to_string())
        };

        let levels = self
            .elements
            .levels
            .values()
            .map(|l| LevelSnapshot {
                name: l.name.clone(),
                elevation: l.elevation,
            })
            .collect();

        let views = self
            .elements
            .views
            .values()
            .map(|v| ViewSnapshot {
                name: v.name.clone(),
                kind: v.kind,
                template: v.is_template,
                discipline: v.discipline.clone(),
                level: v.associated_level.map(level_name),
                crop: v.crop.clone(),
                range: v.range.map(|range| {
                    let mut snapshot = RangeSnapshot::default();
                    for (role, setting) in range.planes() {
                        snapshot.set(
                            role,
                            PlaneSnapshot {
                                level: level_name(setting.level),
                                offset: setting.offset,
                            },
                        );
                    }
                    snapshot
                }),
            })
            .collect();

        let shapes = self
            .elements
            .shapes
            .values()
            .map(|s| ShapeSnapshot {
                name: s.name.clone(),
                comment: s.comment.clone(),
                color: s.color,
                vertices: s.vertices.clone(),
                triangles: s.triangles.clone(),
            })
            .collect();

        DocumentSnapshot {
            levels,
            views,
            shapes,
            active_view: self.active_view().map(|v| v.name),
        }
    }
}
