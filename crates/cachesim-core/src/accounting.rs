//! Energy/time accounting shared by every level of the hierarchy.
//!
//! Each level owns one [`Accumulator`]: a small mutable "current-access
//! scratch" plus the persistent per-access series it commits into. The
//! scratch and the commit step are the mechanism by which overlap is
//! modelled deterministically without a simulation clock — *time* at a
//! level accumulates only while [`Accumulator::probe`] runs; *energy*
//! accumulates both while probing (dynamic) and while a lower/parallel
//! level is doing the work ([`Accumulator::idle`], static).
//!
//! A level may be touched zero, one, or two times while a single trace
//! record is processed (an L1 miss with a dirty eviction drives L2 twice:
//! once for the write-back, once for the refill). All such touches land
//! in the same scratch; [`Accumulator::commit`] is called exactly once
//! per trace record by [`crate::orchestrator::Hierarchy`], regardless of
//! how many times the level was actually touched, so that every level's
//! per-access series stays exactly as long as the trace
//! (spec's "Accesses" series is a constant-1 list by this same
//! convention).

/// A pair of resource totals: energy in joules, time in seconds.
///
/// The source this was distilled from overloads `+` on this pair; here it
/// is a plain value type combined through explicit methods, per the
/// design note against carrying over operator-overload conveniences.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Usage {
    pub energy: f64,
    pub time: f64,
}

impl Usage {
    pub const ZERO: Usage = Usage {
        energy: 0.0,
        time: 0.0,
    };

    /// Accumulate `other` into `self` in place.
    pub fn add_into(&mut self, other: Usage) {
        self.energy += other.energy;
        self.time += other.time;
    }

    /// `self - earlier`, used to isolate the portion of a scratch
    /// contributed since a prior snapshot.
    fn since(self, earlier: Usage) -> Usage {
        Usage {
            energy: self.energy - earlier.energy,
            time: self.time - earlier.time,
        }
    }
}

/// Hardware parameters for one level, stored in SI units (seconds, watts,
/// joules) as spec.md §3 requires, constructed from the engineering units
/// (ns, W, pJ) the hardware table is written in.
#[derive(Debug, Clone, Copy)]
pub struct LevelParams {
    pub access_time: f64,
    pub static_power: f64,
    pub dynamic_power: f64,
    pub transfer_penalty: f64,
}

impl LevelParams {
    pub fn new(access_time_ns: f64, static_power_w: f64, dynamic_power_w: f64, transfer_penalty_pj: f64) -> Self {
        Self {
            access_time: access_time_ns * 1e-9,
            static_power: static_power_w,
            dynamic_power: dynamic_power_w,
            transfer_penalty: transfer_penalty_pj * 1e-12,
        }
    }
}

/// Per-access series recorded by one level: one entry per trace record,
/// in order.
#[derive(Debug, Clone, Default)]
pub struct AccessSeries {
    energy: Vec<f64>,
    time: Vec<f64>,
    misses: Vec<u8>,
}

impl AccessSeries {
    pub fn len(&self) -> usize {
        self.energy.len()
    }

    pub fn is_empty(&self) -> bool {
        self.energy.is_empty()
    }

    pub fn energy(&self) -> &[f64] {
        &self.energy
    }

    pub fn time(&self) -> &[f64] {
        &self.time
    }

    pub fn misses(&self) -> &[u8] {
        &self.misses
    }

    /// Constant-1 "Accesses" series — one access per trace record per
    /// level, by definition (spec.md §4.6), independent of how many times
    /// the level was internally probed that record.
    pub fn accesses(&self) -> Vec<u8> {
        vec![1; self.len()]
    }

    fn push(&mut self, usage: Usage, missed: bool) {
        self.energy.push(usage.energy);
        self.time.push(usage.time);
        self.misses.push(missed as u8);
    }
}

/// Per-level scratch + persistent statistics.
#[derive(Debug, Clone)]
pub struct Accumulator {
    params: LevelParams,
    scratch: Usage,
    missed: bool,
    series: AccessSeries,
}

impl Accumulator {
    pub fn new(params: LevelParams) -> Self {
        Self {
            params,
            scratch: Usage::ZERO,
            missed: false,
            series: AccessSeries::default(),
        }
    }

    pub fn params(&self) -> LevelParams {
        self.params
    }

    pub fn series(&self) -> &AccessSeries {
        &self.series
    }

    /// One dynamic use of the level: tag read, tag write, or any other
    /// single probe of the storage array.
    pub fn probe(&mut self) {
        self.scratch.energy += self.params.dynamic_power * self.params.access_time;
        self.scratch.time += self.params.access_time;
    }

    /// The level was powered but inactive for `duration` because a
    /// deeper or parallel level was doing the work. Adds only to energy —
    /// idle time is never counted in a level's own Time (invariant 4).
    pub fn idle(&mut self, duration: f64) {
        self.scratch.energy += self.params.static_power * duration;
    }

    /// One-time energy cost of a block transferred into this level from
    /// the level above. Charged unconditionally at the top of an
    /// `access()` call servicing a miss from the level above (spec.md
    /// §4.3, §9 open question 1): equivalent to charging only on a real
    /// transfer, since every such call corresponds to exactly one block
    /// moving down.
    pub fn charge_transfer(&mut self) {
        self.scratch.energy += self.params.transfer_penalty;
    }

    /// Record that some sub-access touching this level during the
    /// current trace record missed. Once set it stays set until commit —
    /// if the level is touched twice in one record (write-back + refill)
    /// and either touch misses, the committed sample is a miss.
    pub fn mark_miss(&mut self) {
        self.missed = true;
    }

    /// Snapshot the scratch so a caller can later isolate the delta
    /// contributed by one sub-access (see module docs).
    pub fn snapshot(&self) -> Usage {
        self.scratch
    }

    /// Usage accumulated since `snapshot`, without touching the scratch.
    pub fn delta_since(&self, snapshot: Usage) -> Usage {
        self.scratch.since(snapshot)
    }

    /// Finalize the scratch into the persistent series. Called exactly
    /// once per trace record by the orchestrator, for every level,
    /// whether or not that level was touched this record.
    pub fn commit(&mut self) -> Usage {
        let usage = self.scratch;
        self.series.push(usage, self.missed);
        self.scratch = Usage::ZERO;
        self.missed = false;
        usage
    }
}
