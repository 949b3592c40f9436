use log::{debug, info};
use serde::Serialize;
use thiserror::Error;

use facerig_scene_core::SceneGraph;

use crate::links::{expand_links, PlugLink};
use crate::map::ConnectionMap;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WiringError {
    #[error("connection map has no template '{0}'")]
    UnknownTemplate(String),
}

/// A link the host refused to connect.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FailedLink {
    pub link: PlugLink,
    pub reason: String,
}

/// Outcome of wiring one template section.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WiringReport {
    pub template: String,
    pub connected: Vec<PlugLink>,
    pub missing: Vec<FailedLink>,
}

impl WiringReport {
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}

/// Connect every link of the named templates, replacing existing inputs.
///
/// All template names are checked before anything is connected. Links the host
/// rejects are collected per template and do not stop the pass.
pub fn connect_templates<G: SceneGraph + ?Sized>(
    graph: &mut G,
    map: &ConnectionMap,
    templates: &[&str],
) -> Result<Vec<WiringReport>, WiringError> {
    let sections = templates
        .iter()
        .map(|name| {
            map.template(name)
                .map(|section| (*name, section))
                .ok_or_else(|| WiringError::UnknownTemplate(name.to_string()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut reports = Vec::with_capacity(sections.len());
    for (name, section) in sections {
        let mut report = WiringReport {
            template: name.to_string(),
            ..Default::default()
        };
        for (destination, plugs) in section {
            for link in expand_links(destination, plugs) {
                match graph.connect(&link.source, &link.destination) {
                    Ok(()) => {
                        debug!("connected {link}");
                        report.connected.push(link);
                    }
                    Err(err) => report.missing.push(FailedLink {
                        link,
                        reason: err.to_string(),
                    }),
                }
            }
        }
        info!("{} template connections errors:", name.to_uppercase());
        if report.missing.is_empty() {
            info!("[]");
        }
        for failed in &report.missing {
            info!("{}", failed.link);
        }
        reports.push(report);
    }
    Ok(reports)
}
