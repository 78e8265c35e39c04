//! Network owning the nodes and driving the simulation timeline.
//!
//! Each iteration runs two passes, strictly in this order:
//! 1) Movement: every node, in index order, asks the mobility model for a
//!    displacement and applies it. Positions are never clamped.
//! 2) Delivery: every ordered pair (src, dest) with src != dest is trialled
//!    once on the post-movement positions. Each trial counts one message; it
//!    is delivered when the distance is within the transmission range
//!    (inclusive). Both directions of a pair are trialled independently.
//!
//! The delivery pass is O(n²) per iteration. That is the intended cost model
//! for the tens of nodes this simulator targets.
//!
//! The network never computes a ratio; callers read the two counters.

use log::{debug, trace};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::geometry::in_range;
use super::mobility::{DEFAULT_TRANSMISSION_RANGE, MobilityKind, MobilityModel, MobilityParams};
use super::types::{NetworkSnapshot, Node, NodeSnapshot, Point, WORLD_SIZE};
use crate::common::config::{ConfigError, SimulationConfig};

#[derive(Debug)]
pub struct Network {
    nodes: Vec<Node>,
    mobility: Box<dyn MobilityModel>,
    rng: StdRng,
    delivered_msgs: u64,
    total_msgs: u64,
}

impl Network {
    /// Build a network of `node_count` nodes placed uniformly in
    /// `[0, WORLD_SIZE)²` using the given mobility parameters.
    ///
    /// Parameters are validated before any node is placed. With `seed` set,
    /// placement, model construction and every later draw are reproducible;
    /// otherwise the RNG is seeded from OS entropy.
    pub fn new(node_count: usize, params: &MobilityParams, transmission_range: f64, seed: Option<u64>) -> Result<Self, ConfigError> {
        params.validate(transmission_range)?;
        if u32::try_from(node_count).is_err() {
            return Err(ConfigError::InvalidParameter(format!("node count {} does not fit a node id", node_count)));
        }

        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let nodes = (0..node_count as u32)
            .map(|node_id| {
                let x = rng.gen_range(0.0..WORLD_SIZE);
                let y = rng.gen_range(0.0..WORLD_SIZE);
                Node::new(node_id, Point::new(x, y))
            })
            .collect();
        let mobility = params.build(transmission_range, &mut rng)?;

        debug!(
            "Created network: {} nodes, {} mobility ({:?}), transmission range {}",
            node_count,
            mobility.kind(),
            params,
            transmission_range
        );

        Ok(Self::with_model(nodes, mobility, rng))
    }

    /// Build a network using a selector name and that model's default
    /// parameters with the default transmission range.
    pub fn from_selector(node_count: usize, selector: &str, seed: Option<u64>) -> Result<Self, ConfigError> {
        let kind: MobilityKind = selector.parse()?;
        Self::new(node_count, &MobilityParams::defaults(kind), DEFAULT_TRANSMISSION_RANGE, seed)
    }

    /// Build a network from a full configuration.
    pub fn from_config(config: &SimulationConfig) -> Result<Self, ConfigError> {
        let params = config.validate()?;
        Self::new(config.node_count, &params, config.transmission_range, config.seed)
    }

    /// Assemble a network from explicit nodes and an already built model.
    /// Counters start at zero.
    pub fn with_model(nodes: Vec<Node>, mobility: Box<dyn MobilityModel>, rng: StdRng) -> Self {
        Self {
            nodes,
            mobility,
            rng,
            delivered_msgs: 0,
            total_msgs: 0,
        }
    }

    /// Run `num_iterations` movement + delivery iterations. Zero is a no-op.
    pub fn run(&mut self, num_iterations: u64) {
        for iteration in 0..num_iterations {
            self.step(iteration);
        }
    }

    /// Same as [`Network::run`], handing `observer` a snapshot of the network
    /// after every iteration.
    pub fn run_with_observer<F>(&mut self, num_iterations: u64, mut observer: F)
    where
        F: FnMut(&NetworkSnapshot),
    {
        for iteration in 0..num_iterations {
            self.step(iteration);
            observer(&self.snapshot(iteration));
        }
    }

    fn step(&mut self, iteration: u64) {
        self.move_nodes();
        self.exchange_messages();
        trace!(
            "Iteration {}: delivered {} / total {}",
            iteration, self.delivered_msgs, self.total_msgs
        );
    }

    /// Movement pass.
    fn move_nodes(&mut self) {
        for node in self.nodes.iter_mut() {
            let displacement = self.mobility.displacement(&node.position, &mut self.rng);
            node.apply(displacement);
        }
    }

    /// Delivery pass: src ascending, dest ascending, skipping src == dest.
    fn exchange_messages(&mut self) {
        let node_count = self.nodes.len();
        for src in 0..node_count {
            for dest in 0..node_count {
                if src != dest {
                    self.send_message(src, dest);
                }
            }
        }
    }

    /// Trial a single message from node index `src` to node index `dest`
    /// on current positions. Returns whether it was delivered.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub(crate) fn send_message(&mut self, src: usize, dest: usize) -> bool {
        self.total_msgs += 1;
        let delivered = in_range(&self.nodes[src].position, &self.nodes[dest].position, self.mobility.transmission_range());
        if delivered {
            self.delivered_msgs += 1;
        }
        delivered
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn delivered_msgs(&self) -> u64 {
        self.delivered_msgs
    }

    pub fn total_msgs(&self) -> u64 {
        self.total_msgs
    }

    pub fn transmission_range(&self) -> f64 {
        self.mobility.transmission_range()
    }

    pub fn mobility_kind(&self) -> MobilityKind {
        self.mobility.kind()
    }

    /// Capture current positions and counters.
    pub fn snapshot(&self, iteration: u64) -> NetworkSnapshot {
        NetworkSnapshot {
            iteration,
            nodes: self.nodes.iter().map(NodeSnapshot::from).collect(),
            delivered_msgs: self.delivered_msgs,
            total_msgs: self.total_msgs,
        }
    }
}
