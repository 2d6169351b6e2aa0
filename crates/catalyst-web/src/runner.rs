use catalyst_engine::{
    custom_kinds, ChemError, CircleBuffer, FixedTimestep, InputEvent, InputQueue, Lab, LabConfig,
    LabEvent, WireEvent, WorldId,
};

/// Circles drawn per world per frame; the rest are dropped.
const MAX_CIRCLES: usize = 4096;

/// Wires the lab to the host loop.
///
/// The host pushes input between frames and calls `tick` once per animation
/// frame. After a tick the per-world circle buffers and the event buffer
/// hold that frame's output until the next tick.
pub struct LabRunner {
    lab: Lab,
    input: InputQueue,
    timestep: FixedTimestep,
    circles: Vec<CircleBuffer>,
    /// Flat wire events for SharedArrayBuffer reads.
    wire_events: Vec<WireEvent>,
    /// The same events with their string payloads, for the DOM layer.
    events: Vec<LabEvent>,
}

impl LabRunner {
    pub fn new(lab: Lab) -> Self {
        let timestep = FixedTimestep::new(lab.config().fixed_dt);
        let circles = lab
            .worlds()
            .iter()
            .map(|_| CircleBuffer::with_capacity(MAX_CIRCLES))
            .collect();
        Self {
            lab,
            input: InputQueue::new(),
            timestep,
            circles,
            wire_events: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Build a lab from JSON config overrides (empty means defaults).
    pub fn from_config_json(json: &str, seed: u64) -> Result<Self, ChemError> {
        let mut config = if json.trim().is_empty() {
            LabConfig::default()
        } else {
            LabConfig::from_json(json)?
        };
        config.rng_seed.get_or_insert(seed);
        Ok(Self::new(Lab::new(config)?))
    }

    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Run one host frame: apply input, step the worlds, credit passive
    /// production, then rebuild the output buffers.
    pub fn tick(&mut self, dt: f32) {
        for event in self.input.drain() {
            self.apply(event);
        }

        if self.lab.is_paused() {
            self.timestep.reset();
        } else {
            let steps = self.timestep.accumulate(dt);
            for _ in 0..steps {
                self.lab.step(self.timestep.dt());
            }
            self.lab.auto_tick(dt as f64);
        }

        for (world, buf) in self.lab.worlds().iter().zip(self.circles.iter_mut()) {
            buf.clear();
            world.render(buf);
        }

        self.events = self.lab.drain_events();
        self.wire_events.clear();
        self.wire_events.extend(self.events.iter().map(LabEvent::to_wire));
    }

    fn apply(&mut self, event: InputEvent) {
        let result = match event {
            InputEvent::PointerDown { world, x, y } => {
                self.lab.click(WorldId(world as usize), x, y).map(|_| ())
            }
            InputEvent::Custom { kind, a, .. } => match kind {
                custom_kinds::SET_MODAL => {
                    self.lab.set_modal_open(a != 0.0);
                    Ok(())
                }
                custom_kinds::COLLECT_ALL => self.lab.collect_all(WorldId(a as usize)).map(|_| ()),
                custom_kinds::CYCLE_SPAWN_AMOUNT => {
                    self.lab.cycle_spawn_amount();
                    Ok(())
                }
                other => {
                    log::warn!("unknown custom event kind {}", other);
                    Ok(())
                }
            },
        };
        if let Err(err) = result {
            log::warn!("input dropped: {}", err);
        }
    }

    /// Buy an upgrade now. Returns false when refused.
    pub fn purchase(&mut self, id: &str) -> bool {
        self.lab.purchase(id).is_ok()
    }

    /// Move stored elements into a world now. Returns how many were placed.
    pub fn spawn_from_storage(&mut self, world: u32, symbol: &str, count: u32) -> u32 {
        match self.lab.spawn_from_storage(WorldId(world as usize), symbol, count) {
            Ok(n) => n,
            Err(err) => {
                log::debug!("spawn from storage refused: {}", err);
                0
            }
        }
    }

    /// Spawn from storage using the current batch size.
    pub fn spawn_batch(&mut self, world: u32, symbol: &str) -> u32 {
        let amount = self.lab.spawn_amount();
        self.spawn_from_storage(world, symbol, amount)
    }

    pub fn snapshot_json(&self) -> String {
        self.lab.snapshot().to_json().unwrap_or_else(|err| {
            log::error!("snapshot failed: {}", err);
            String::from("{}")
        })
    }

    pub fn events_json(&self) -> String {
        serde_json::to_string(&self.events).unwrap_or_else(|_| String::from("[]"))
    }

    pub fn lab(&self) -> &Lab {
        &self.lab
    }

    // ---- Pointer accessors for SharedArrayBuffer reads ----

    pub fn circles_ptr(&self, world: u32) -> *const f32 {
        self.circles
            .get(world as usize)
            .map_or(std::ptr::null(), |b| b.instances_ptr())
    }

    pub fn circle_count(&self, world: u32) -> u32 {
        self.circles.get(world as usize).map_or(0, |b| b.instance_count())
    }

    pub fn events_ptr(&self) -> *const f32 {
        self.wire_events.as_ptr() as *const f32
    }

    pub fn events_len(&self) -> u32 {
        self.wire_events.len() as u32
    }

    pub fn world_count(&self) -> u32 {
        self.lab.worlds().len() as u32
    }

    pub fn world_width(&self, world: u32) -> f32 {
        self.lab.world(WorldId(world as usize)).map_or(0.0, |w| w.width())
    }

    pub fn world_height(&self, world: u32) -> f32 {
        self.lab.world(WorldId(world as usize)).map_or(0.0, |w| w.height())
    }

    /// Element symbol for a circle label index.
    pub fn symbol(&self, index: u32) -> String {
        self.lab
            .registry()
            .element_at(index)
            .map(|k| k.symbol.clone())
            .unwrap_or_default()
    }
}
