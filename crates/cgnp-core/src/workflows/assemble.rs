use crate::core::geometry::fuse::force_overlap;
use crate::core::models::bead::BeadKind;
use crate::core::models::compound::Compound;
use crate::core::models::ids::PortId;
use crate::engine::chain_builder::ChainBuilder;
use crate::engine::config::NanoparticleConfig;
use crate::engine::core_builder::{build_core, core_bead_count};
use crate::engine::error::{BuildError, MAX_BEADS};
use crate::engine::progress::{Progress, ProgressReporter};
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

/// Rigid-body group shared by every core bead.
pub const CORE_RIGID_BODY: usize = 0;

/// Counts describing a nanoparticle, available before or after it is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct BuildSummary {
    pub core_beads: usize,
    pub chains: usize,
    pub beads_per_chain: usize,
    pub total_beads: usize,
}

impl BuildSummary {
    /// Fails with [`BuildError::TooManyBeads`] when the total exceeds [`MAX_BEADS`].
    fn new(core_beads: usize, chains: usize, beads_per_chain: usize) -> Result<Self, BuildError> {
        let total_beads = chains
            .checked_mul(beads_per_chain)
            .and_then(|chain_beads| chain_beads.checked_add(core_beads))
            .filter(|&total| total <= MAX_BEADS)
            .ok_or(BuildError::TooManyBeads {
                requested: core_beads as f64 + chains as f64 * beads_per_chain as f64,
                limit: MAX_BEADS,
            })?;
        Ok(Self {
            core_beads,
            chains,
            beads_per_chain,
            total_beads,
        })
    }

    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string(self)
    }
}

/// A core coated with one chain per attachment point.
#[derive(Debug, Clone)]
pub struct Nanoparticle {
    structure: Compound,
    summary: BuildSummary,
}

impl Nanoparticle {
    pub fn structure(&self) -> &Compound {
        &self.structure
    }

    pub fn into_structure(self) -> Compound {
        self.structure
    }

    pub fn core_bead_count(&self) -> usize {
        self.summary.core_beads
    }

    pub fn chain_count(&self) -> usize {
        self.summary.chains
    }

    pub fn beads_per_chain(&self) -> usize {
        self.summary.beads_per_chain
    }

    pub fn summary(&self) -> BuildSummary {
        self.summary
    }
}

/// Computes the counts [`run`] would produce without placing any bead.
pub fn predict(config: &NanoparticleConfig) -> Result<BuildSummary, BuildError> {
    let beads_per_chain = ChainBuilder::from_config(&config.chain).bead_count()?;
    let core_beads = core_bead_count(&config.core)?;
    BuildSummary::new(core_beads, core_beads, beads_per_chain)
}

#[instrument(skip_all, name = "assembly_workflow")]
pub fn run(
    config: &NanoparticleConfig,
    reporter: &ProgressReporter,
) -> Result<Nanoparticle, BuildError> {
    log_coating_options(config);

    let expected = predict(config)?;
    let chain_builder = ChainBuilder::from_config(&config.chain);
    let beads_per_chain = expected.beads_per_chain;

    // === Phase 1: Core ===
    let core = reporter.phase("Building Core", || {
        info!("Placing core beads on the sphere surface.");
        let core = build_core(&config.core)?;
        reporter.report(Progress::Message(format!(
            "{} core beads, {} chains of {} beads",
            core.bead_count(),
            core.attachment_points().len(),
            beads_per_chain
        )));
        Ok::<_, BuildError>(core)
    })?;
    let core_beads = core.bead_count();
    let (mut structure, attachment_points) = core.into_parts();

    // === Phase 2: Chains ===
    let chains = reporter.phase("Attaching Chains", || {
        info!(chains = attachment_points.len(), "Growing and fusing chains.");
        attach_chains(&mut structure, &attachment_points, &chain_builder, reporter)
    })?;

    if chains != attachment_points.len() {
        return Err(BuildError::AttachmentMismatch {
            attachment_points: attachment_points.len(),
            chains,
        });
    }
    if structure.port_count() != 0 {
        return Err(BuildError::UnconsumedPorts {
            count: structure.port_count(),
        });
    }

    // === Phase 3: Rigid bodies ===
    reporter.phase("Labeling Rigid Bodies", || {
        let labeled = structure.label_rigid_bodies(BeadKind::Core, CORE_RIGID_BODY);
        info!(
            beads = labeled,
            kind = %BeadKind::Core,
            body = CORE_RIGID_BODY,
            "Beads grouped into one rigid body."
        );
        Ok::<_, BuildError>(())
    })?;

    let summary = BuildSummary::new(core_beads, chains, beads_per_chain)?;
    if summary != expected || structure.bead_count() != summary.total_beads {
        return Err(BuildError::Internal(format!(
            "expected {} beads after assembly, found {}",
            summary.total_beads,
            structure.bead_count()
        )));
    }

    debug!(center = ?structure.center(), "Assembled structure centroid.");
    info!(
        total_beads = summary.total_beads,
        "Nanoparticle assembly completed successfully."
    );
    Ok(Nanoparticle { structure, summary })
}

/// Fuses one fresh chain onto every attachment point, last point first.
///
/// Chain `i` (1-based) is fused onto `attachment_points[i - 1]` and its beads are given
/// structural unit `i`. Returns the number of chains fused.
fn attach_chains(
    structure: &mut Compound,
    attachment_points: &[PortId],
    chain_builder: &ChainBuilder,
    reporter: &ProgressReporter,
) -> Result<usize, BuildError> {
    reporter.report(Progress::TaskStart {
        total_steps: attachment_points.len() as u64,
    });

    let mut fused = 0;
    for unit in (1..=attachment_points.len()).rev() {
        let (mut chain, free_port) = chain_builder.build()?.into_parts();
        chain.assign_unit(unit);
        force_overlap(structure, chain, free_port, attachment_points[unit - 1])?;
        fused += 1;
        debug!(unit, "Chain fused onto core.");
        reporter.report(Progress::TaskIncrement);
    }

    reporter.report(Progress::TaskFinish);
    Ok(fused)
}

fn log_coating_options(config: &NanoparticleConfig) {
    let coating = &config.coating;
    debug!(
        chain_density = coating.chain_density,
        pattern = ?coating.pattern,
        "Chain density is recorded but every attachment point receives a chain."
    );
    if let Some(backfill) = &coating.backfill {
        warn!(
            chain_length = backfill.chain_length,
            "Backfill chains are not supported yet and will be ignored."
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::config::{ChainConfig, CoreSizing, NanoparticleConfigBuilder};
    use std::sync::{Arc, Mutex};

    fn small_config(chain_length: usize) -> NanoparticleConfig {
        NanoparticleConfigBuilder::new()
            .radius(1.5)
            .bead_diameter(0.2)
            .chain_length(chain_length)
            .chain_density(0.5)
            .build()
            .unwrap()
    }

    #[test]
    fn run_fuses_one_chain_per_core_bead() {
        let config = small_config(12);
        let np = run(&config, &ProgressReporter::new()).unwrap();

        let core_beads = np.core_bead_count();
        assert_eq!(core_beads, 5);
        assert_eq!(np.chain_count(), core_beads);
        assert_eq!(np.beads_per_chain(), 4);
        assert_eq!(np.structure().bead_count(), core_beads * 5);
        assert_eq!(np.structure().port_count(), 0);
        assert_eq!(np.structure().bonds().len(), core_beads * 4);
    }

    #[test]
    fn chains_get_unit_indices_and_core_is_one_rigid_body() {
        let np = run(&small_config(6), &ProgressReporter::new()).unwrap();
        let structure = np.structure();

        for (_, bead) in structure.beads_by_kind(BeadKind::Core) {
            assert_eq!(bead.unit, 0);
            assert_eq!(bead.rigid_body, Some(CORE_RIGID_BODY));
        }
        let mut units: Vec<usize> = structure
            .beads_iter()
            .filter(|(_, b)| b.kind != BeadKind::Core)
            .map(|(_, b)| b.unit)
            .collect();
        units.sort_unstable();
        units.dedup();
        assert_eq!(units, (1..=np.chain_count()).collect::<Vec<_>>());
        assert!(
            structure
                .beads_iter()
                .filter(|(_, b)| b.kind != BeadKind::Core)
                .all(|(_, b)| b.rigid_body.is_none())
        );
    }

    #[test]
    fn first_chain_bead_sits_outside_its_core_bead() {
        let config = small_config(3);
        let np = run(&config, &ProgressReporter::new()).unwrap();
        let structure = np.structure();
        let expected_gap = config.core.radius / 5.0 + config.chain.segment_separation / 2.0;

        for (core_id, core_bead) in structure.beads_by_kind(BeadKind::Core) {
            let neighbours = structure.bonded_neighbors(core_id).unwrap();
            assert_eq!(neighbours.len(), 1);
            let cap = structure.bead(neighbours[0]).unwrap();
            assert_eq!(cap.kind, BeadKind::Cap);
            let outward = core_bead.position.coords.normalize();
            let expected = core_bead.position + outward * expected_gap;
            assert!((cap.position - expected).norm() < 1e-9);
        }
    }

    #[test]
    fn invalid_chain_length_fails_before_building_anything() {
        let events = Arc::new(Mutex::new(Vec::new()));
        let recorder = events.clone();
        let reporter = ProgressReporter::with_callback(Box::new(move |e| {
            recorder.lock().unwrap().push(e);
        }));

        let err = run(&small_config(10), &reporter).unwrap_err();

        assert!(matches!(err, BuildError::InvalidChainLength { chain_length: 10 }));
        assert!(events.lock().unwrap().is_empty());
    }

    #[test]
    fn reports_phases_and_one_increment_per_chain() {
        let events = Arc::new(Mutex::new(Vec::new()));
        let recorder = events.clone();
        let reporter = ProgressReporter::with_callback(Box::new(move |e| {
            recorder.lock().unwrap().push(e);
        }));

        let np = run(&small_config(12), &reporter).unwrap();
        let events = events.lock().unwrap();

        let phases: Vec<&str> = events
            .iter()
            .filter_map(|e| match e {
                Progress::PhaseStart { name } => Some(*name),
                _ => None,
            })
            .collect();
        assert_eq!(
            phases,
            vec!["Building Core", "Attaching Chains", "Labeling Rigid Bodies"]
        );
        let increments = events
            .iter()
            .filter(|e| **e == Progress::TaskIncrement)
            .count();
        assert_eq!(increments, np.chain_count());
        assert!(events.contains(&Progress::TaskStart {
            total_steps: np.chain_count() as u64
        }));
    }

    #[test]
    fn backfill_is_accepted_and_ignored() {
        let mut config = small_config(12);
        config.coating.backfill = Some(ChainConfig {
            chain_length: 6,
            segment_separation: 0.3,
        });
        let with_backfill = run(&config, &ProgressReporter::new()).unwrap();
        let without = run(&small_config(12), &ProgressReporter::new()).unwrap();
        assert_eq!(with_backfill.summary(), without.summary());
    }

    #[test]
    fn predict_matches_a_real_build() {
        let mut config = small_config(9);
        config.core.sizing = CoreSizing::AreaRatio;
        config.core.radius = 1.0;
        config.core.bead_diameter = 0.5;

        let predicted = predict(&config).unwrap();
        let built = run(&config, &ProgressReporter::new()).unwrap();
        assert_eq!(predicted, built.summary());
        assert_eq!(predicted.core_beads, 16);
        assert_eq!(predicted.total_beads, 16 + 16 * 3);
    }

    #[test]
    fn summary_serializes_with_kebab_case_keys() {
        let summary = BuildSummary::new(251, 251, 4).unwrap();
        let text = summary.to_toml_string().unwrap();
        assert!(text.contains("core-beads = 251"));
        assert!(text.contains("beads-per-chain = 4"));
        assert!(text.contains("total-beads = 1255"));
    }

    #[test]
    fn oversized_totals_are_errors_not_overflows() {
        let err = predict(&small_config(usize::MAX)).unwrap_err();
        assert!(matches!(err, BuildError::TooManyBeads { limit, .. } if limit == MAX_BEADS));

        let err = run(&small_config(usize::MAX), &ProgressReporter::new()).unwrap_err();
        assert!(matches!(err, BuildError::TooManyBeads { .. }));

        let mut config = small_config(12);
        config.core.radius = 1e10;
        assert!(matches!(
            predict(&config),
            Err(BuildError::TooManyBeads { .. })
        ));
        assert!(matches!(
            BuildSummary::new(usize::MAX, 1, 1),
            Err(BuildError::TooManyBeads { .. })
        ));
    }

    #[test]
    fn core_phase_reports_the_planned_counts() {
        let events = Arc::new(Mutex::new(Vec::new()));
        let recorder = events.clone();
        let reporter = ProgressReporter::with_callback(Box::new(move |e| {
            recorder.lock().unwrap().push(e);
        }));

        run(&small_config(12), &reporter).unwrap();

        assert!(
            events
                .lock()
                .unwrap()
                .contains(&Progress::Message("5 core beads, 5 chains of 4 beads".to_string()))
        );
    }
}
