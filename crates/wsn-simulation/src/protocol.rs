use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use wsn_core::NodeId;

use crate::clustering::ClusteringProtocol;
use crate::contention::ContentionProtocol;
use crate::context::RoundContext;
use crate::diffusion::DiffusionProtocol;

/// Per-round protocol flags for one node.
///
/// Recomputed from scratch every round; nothing here is carried forward.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotations {
    /// Selected as cluster head this round.
    pub cluster_head: bool,
    /// Farther than the isolation threshold from every cluster head.
    pub isolated: bool,
    /// Won the channel this round.
    pub transmitting: bool,
    /// Originated an interest flood this round.
    pub originator: bool,
    /// Reception charges incurred from interest floods this round.
    pub receptions: u32,
}

impl Annotations {
    /// Short labels for every flag that is set.
    pub fn labels(&self) -> Vec<&'static str> {
        let mut labels = Vec::new();
        if self.cluster_head {
            labels.push("head");
        }
        if self.isolated {
            labels.push("isolated");
        }
        if self.transmitting {
            labels.push("tx");
        }
        if self.originator {
            labels.push("origin");
        }
        if self.receptions > 0 {
            labels.push("rx");
        }
        labels
    }
}

/// The outcome of one protocol step: tags per node plus the drains to apply.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoundAnnotations {
    tags: Vec<Annotations>,
    drains: Vec<(NodeId, f64)>,
}

impl RoundAnnotations {
    /// Empty annotations for a field of `node_count` nodes.
    pub fn new(node_count: usize) -> Self {
        Self {
            tags: vec![Annotations::default(); node_count],
            drains: Vec::new(),
        }
    }

    /// Tags of one node. Unknown ids get the all-clear default.
    pub fn tags(&self, id: NodeId) -> Annotations {
        self.tags.get(id.0 as usize).copied().unwrap_or_default()
    }

    /// Mutable tags of one node, if the id is in range.
    pub fn tags_mut(&mut self, id: NodeId) -> Option<&mut Annotations> {
        self.tags.get_mut(id.0 as usize)
    }

    /// Tags for every node in id order.
    pub fn all_tags(&self) -> &[Annotations] {
        &self.tags
    }

    /// Queue a drain for the ledger.
    pub fn charge(&mut self, id: NodeId, amount: f64) {
        self.drains.push((id, amount));
    }

    /// Drains in the order they were queued.
    pub fn drains(&self) -> &[(NodeId, f64)] {
        &self.drains
    }

    /// Number of nodes whose tags satisfy `pred`.
    pub fn count(&self, pred: impl Fn(&Annotations) -> bool) -> usize {
        self.tags.iter().filter(|t| pred(t)).count()
    }

    /// Split into tags and drains.
    pub fn into_parts(self) -> (Vec<Annotations>, Vec<(NodeId, f64)>) {
        (self.tags, self.drains)
    }
}

/// A medium-access or routing strategy evaluated once per round.
///
/// Implementations read the start-of-round field and configuration from the
/// context and must draw from `ctx.rng` in ascending node id order so that a
/// seed fully determines every round.
pub trait Protocol: fmt::Debug {
    /// Which variant this is.
    fn kind(&self) -> ProtocolKind;

    /// Decide this round's tags and drains without touching the field.
    fn step(&self, ctx: &mut RoundContext<'_>) -> RoundAnnotations;
}

/// Selector for the three built-in protocols.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProtocolKind {
    /// LEACH-style cluster-head election.
    Clustering,
    /// CSMA-style probabilistic channel access.
    Contention,
    /// Directed-diffusion-style interest flooding.
    Diffusion,
}

impl ProtocolKind {
    /// Every protocol, in display order.
    pub const ALL: [ProtocolKind; 3] = [Self::Clustering, Self::Contention, Self::Diffusion];

    /// Create the strategy object for this variant.
    pub fn build(self) -> Box<dyn Protocol> {
        match self {
            Self::Clustering => Box::new(ClusteringProtocol),
            Self::Contention => Box::new(ContentionProtocol),
            Self::Diffusion => Box::new(DiffusionProtocol),
        }
    }

    /// Conventional name of the modelled protocol.
    pub fn label(self) -> &'static str {
        match self {
            Self::Clustering => "LEACH",
            Self::Contention => "CSMA",
            Self::Diffusion => "Directed Diffusion",
        }
    }
}

impl fmt::Display for ProtocolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Clustering => write!(f, "clustering"),
            Self::Contention => write!(f, "contention"),
            Self::Diffusion => write!(f, "diffusion"),
        }
    }
}

impl FromStr for ProtocolKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "clustering" | "leach" => Ok(Self::Clustering),
            "contention" | "csma" | "mac" => Ok(Self::Contention),
            "diffusion" | "dd" | "directed-diffusion" => Ok(Self::Diffusion),
            other => Err(format!(
                "unknown protocol \"{other}\". Use: leach, csma, diffusion"
            )),
        }
    }
}
