//! Power budget estimation.
//!
//! The estimate is a TDP-based approximation: a fixed baseline for the board,
//! fans and idle losses, the processor and graphics card TDPs, and flat
//! allowances for memory and storage. The 20% headroom is applied before the
//! value is returned, so callers compare PSU ratings against it directly.

use crate::schema::{Build, Category};

/// Motherboard, fans and idle losses.
pub const BASELINE_WATTS: u32 = 50;
/// Flat allowance for memory, independent of module count.
pub const MEMORY_WATTS: u32 = 10;
pub const SSD_WATTS: u32 = 5;
pub const HDD_WATTS: u32 = 10;

/// `ceil(watts * 1.2)` in integer arithmetic.
pub fn with_headroom(watts: u32) -> u32 {
    watts.saturating_mul(12).div_ceil(10)
}

/// Estimated total draw of `build` in watts, headroom included.
pub fn estimate_wattage(build: &Build) -> u32 {
    with_headroom(raw_load(build))
}

/// PSU rating that keeps 20% headroom over the estimate.
pub fn recommended_psu_wattage(build: &Build) -> u32 {
    with_headroom(estimate_wattage(build))
}

/// Categories that contributed to the estimate beyond the baseline. A
/// processor or graphics card without a TDP adds nothing and is left out.
pub fn load_contributors(build: &Build) -> Vec<Category> {
    [
        Category::Processor,
        Category::GraphicsCard,
        Category::Memory,
        Category::SolidStateDrive,
        Category::HardDiskDrive,
    ]
    .into_iter()
    .filter(|c| match c {
        Category::Processor | Category::GraphicsCard => {
            build.get(*c).is_some_and(|part| part.tdp.is_some())
        }
        _ => build.contains(*c),
    })
    .collect()
}

fn raw_load(build: &Build) -> u32 {
    let mut watts = BASELINE_WATTS;

    if let Some(tdp) = build.get(Category::Processor).and_then(|c| c.tdp) {
        watts = watts.saturating_add(tdp);
    }
    if let Some(tdp) = build.get(Category::GraphicsCard).and_then(|c| c.tdp) {
        watts = watts.saturating_add(tdp);
    }
    if build.contains(Category::Memory) {
        watts = watts.saturating_add(MEMORY_WATTS);
    }
    if build.contains(Category::SolidStateDrive) {
        watts = watts.saturating_add(SSD_WATTS);
    }
    if build.contains(Category::HardDiskDrive) {
        watts = watts.saturating_add(HDD_WATTS);
    }

    watts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Component;

    #[test]
    fn headroom_rounds_up() {
        assert_eq!(with_headroom(50), 60);
        assert_eq!(with_headroom(345), 414);
        assert_eq!(with_headroom(414), 497);
        assert_eq!(with_headroom(0), 0);
    }

    #[test]
    fn empty_build_is_baseline() {
        assert_eq!(estimate_wattage(&Build::new()), 60);
    }

    #[test]
    fn storage_allowances() {
        let build = Build::new()
            .with(Category::SolidStateDrive, Component::new("ssd", "NVMe 1TB"))
            .with(Category::HardDiskDrive, Component::new("hdd", "Barracuda 4TB"));
        // (50 + 5 + 10) * 1.2 = 78
        assert_eq!(estimate_wattage(&build), 78);
    }

    #[test]
    fn missing_tdp_adds_nothing() {
        let build = Build::new().with(Category::Processor, Component::new("cpu", "Mystery CPU"));
        assert_eq!(estimate_wattage(&build), 60);
        assert!(load_contributors(&build).is_empty());
    }

    #[test]
    fn contributors_follow_estimate() {
        let build = Build::new()
            .with(Category::Processor, Component::new("cpu", "Ryzen 5").with_tdp(65))
            .with(Category::GraphicsCard, Component::new("gpu", "Mystery GPU"))
            .with(Category::Memory, Component::new("ram", "16GB Kit"));
        assert_eq!(
            load_contributors(&build),
            vec![Category::Processor, Category::Memory]
        );
    }
}
