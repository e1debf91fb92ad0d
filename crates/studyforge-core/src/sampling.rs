//! Domain-stratified sampling.
//!
//! Sampling runs in two phases. The quota phase shuffles each domain's
//! bucket and takes up to that domain's target. The top-up phase fills the
//! remaining room up to the grand total from unused items. The result is
//! reshuffled as a whole. All randomness comes from the caller's RNG so
//! tests can pass a seeded one.

use std::collections::BTreeMap;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::model::Domain;

/// Per-domain quotas, indexed by domain number minus one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainTargets(pub [usize; 5]);

impl DomainTargets {
    pub fn get(&self, domain: Domain) -> usize {
        self.0[domain.index()]
    }

    pub fn sum(&self) -> usize {
        self.0.iter().sum()
    }

    /// Shrink the quotas to `total`, keeping their proportions.
    ///
    /// Each domain gets the floor of its exact share; the leftover units go
    /// to the largest remainders, lower domain first on ties. Targets that
    /// already fit within `total` are returned unchanged.
    pub fn scaled_to(&self, total: usize) -> DomainTargets {
        let sum = self.sum();
        if sum <= total {
            return *self;
        }

        let mut scaled = [0usize; 5];
        let mut remainders = [(0usize, 0usize); 5];
        for (i, &target) in self.0.iter().enumerate() {
            let exact = target * total;
            scaled[i] = exact / sum;
            remainders[i] = (exact % sum, i);
        }

        let leftover = total - scaled.iter().sum::<usize>();
        // Stable sort keeps lower domains first among equal remainders.
        remainders.sort_by(|a, b| b.0.cmp(&a.0));
        for &(_, i) in remainders.iter().take(leftover) {
            scaled[i] += 1;
        }
        DomainTargets(scaled)
    }
}

/// Where the top-up phase draws from when quotas leave room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TopUp {
    /// Drain unused items domain by domain in this order.
    DomainOrder(Vec<Domain>),
    /// Draw uniformly from every unused item.
    AnyLeftover,
}

/// Quotas, grand total, and top-up strategy for one sampler run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SamplePlan {
    pub targets: DomainTargets,
    pub total: usize,
    pub top_up: TopUp,
}

/// How many items each phase contributed, per domain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SampleReport {
    pub pool_size: usize,
    pub quota: BTreeMap<Domain, usize>,
    pub top_up: BTreeMap<Domain, usize>,
}

impl SampleReport {
    pub fn total(&self) -> usize {
        self.quota.values().sum::<usize>() + self.top_up.values().sum::<usize>()
    }

    /// Final count per domain, both phases combined.
    pub fn per_domain(&self) -> BTreeMap<Domain, usize> {
        let mut out = self.quota.clone();
        for (d, n) in &self.top_up {
            *out.entry(*d).or_insert(0) += n;
        }
        out
    }
}

/// Seeded RNG when a seed is configured, otherwise one seeded from OS entropy.
pub fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    }
}

/// Draw a stratified sample from `items` according to `plan`.
pub fn stratified_sample<T, F, R>(
    items: Vec<T>,
    domain_of: F,
    plan: &SamplePlan,
    rng: &mut R,
) -> (Vec<T>, SampleReport)
where
    F: Fn(&T) -> Domain,
    R: Rng + ?Sized,
{
    let mut report = SampleReport {
        pool_size: items.len(),
        ..Default::default()
    };

    let mut buckets: Vec<Vec<usize>> = vec![Vec::new(); Domain::ALL.len()];
    for (i, item) in items.iter().enumerate() {
        buckets[domain_of(item).index()].push(i);
    }

    let targets = plan.targets.scaled_to(plan.total);

    // Quota phase. Buckets keep only the unused indices afterwards.
    let mut picked: Vec<usize> = Vec::with_capacity(plan.total.min(items.len()));
    for domain in Domain::ALL {
        let bucket = &mut buckets[domain.index()];
        bucket.shuffle(rng);
        let room = plan.total.saturating_sub(picked.len());
        let take = targets.get(domain).min(bucket.len()).min(room);
        picked.extend(bucket.drain(..take));
        report.quota.insert(domain, take);
    }

    // Top-up phase.
    let mut need = plan.total.saturating_sub(picked.len());
    if need > 0 {
        match &plan.top_up {
            TopUp::DomainOrder(order) => {
                for &domain in order {
                    if need == 0 {
                        break;
                    }
                    let bucket = &mut buckets[domain.index()];
                    let take = need.min(bucket.len());
                    picked.extend(bucket.drain(..take));
                    *report.top_up.entry(domain).or_insert(0) += take;
                    need -= take;
                }
            }
            TopUp::AnyLeftover => {
                let mut leftovers: Vec<usize> = buckets.iter_mut().flat_map(|b| b.drain(..)).collect();
                leftovers.shuffle(rng);
                for i in leftovers.into_iter().take(need) {
                    *report.top_up.entry(domain_of(&items[i])).or_insert(0) += 1;
                    picked.push(i);
                }
            }
        }
    }

    let mut slots: Vec<Option<T>> = items.into_iter().map(Some).collect();
    let mut sample: Vec<T> = picked.into_iter().filter_map(|i| slots[i].take()).collect();
    sample.shuffle(rng);

    tracing::debug!(
        pool = report.pool_size,
        sampled = sample.len(),
        "stratified sample drawn"
    );

    (sample, report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Item {
        id: usize,
        domain: Domain,
    }

    fn pool(counts: [usize; 5]) -> Vec<Item> {
        let mut items = Vec::new();
        for (d, &n) in Domain::ALL.iter().zip(counts.iter()) {
            for _ in 0..n {
                items.push(Item {
                    id: items.len(),
                    domain: *d,
                });
            }
        }
        items
    }

    fn plan(targets: [usize; 5], total: usize, top_up: TopUp) -> SamplePlan {
        SamplePlan {
            targets: DomainTargets(targets),
            total,
            top_up,
        }
    }

    #[test]
    fn full_pool_hits_every_quota() {
        let items = pool([50, 100, 50, 100, 100]);
        let plan = plan([36, 72, 39, 87, 66], 300, TopUp::AnyLeftover);
        let (sample, report) = stratified_sample(items, |i| i.domain, &plan, &mut make_rng(Some(7)));
        assert_eq!(sample.len(), 300);
        assert_eq!(report.quota[&Domain::Four], 87);
        assert!(report.top_up.values().all(|&n| n == 0));
    }

    #[test]
    fn quota_never_exceeds_target_and_total_never_exceeds_grand_total() {
        for seed in 0..20 {
            let items = pool([5, 200, 3, 40, 90]);
            let plan = plan([36, 72, 39, 87, 66], 300, TopUp::DomainOrder(vec![
                Domain::Four,
                Domain::Two,
                Domain::Five,
                Domain::Three,
                Domain::One,
            ]));
            let (sample, report) =
                stratified_sample(items, |i| i.domain, &plan, &mut make_rng(Some(seed)));
            for d in Domain::ALL {
                assert!(report.quota[&d] <= plan.targets.get(d));
            }
            assert!(sample.len() <= plan.total);
            assert_eq!(sample.len(), report.total());
        }
    }

    #[test]
    fn shortfall_is_redistributed_in_fallback_order() {
        // Domain 1 is short by 6; domain 4 has spare items and comes first.
        let items = pool([30, 72, 39, 100, 66]);
        let plan = plan([36, 72, 39, 87, 66], 300, TopUp::DomainOrder(vec![
            Domain::Four,
            Domain::Two,
        ]));
        let (sample, report) = stratified_sample(items, |i| i.domain, &plan, &mut make_rng(Some(1)));
        assert_eq!(sample.len(), 300);
        assert_eq!(report.top_up[&Domain::Four], 6);
        assert_eq!(report.per_domain()[&Domain::Four], 93);
    }

    #[test]
    fn exhausted_pool_returns_fewer_items() {
        let items = pool([1, 2, 0, 0, 1]);
        let plan = plan([36, 72, 39, 87, 66], 300, TopUp::AnyLeftover);
        let (sample, _) = stratified_sample(items, |i| i.domain, &plan, &mut make_rng(Some(3)));
        assert_eq!(sample.len(), 4);
    }

    #[test]
    fn no_item_is_picked_twice() {
        let items = pool([40, 80, 40, 90, 70]);
        let plan = plan([36, 72, 39, 87, 66], 300, TopUp::AnyLeftover);
        let (sample, _) = stratified_sample(items, |i| i.domain, &plan, &mut make_rng(Some(11)));
        let mut ids: Vec<usize> = sample.iter().map(|i| i.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), sample.len());
    }

    #[test]
    fn same_seed_same_sample() {
        let plan = plan([2, 2, 2, 2, 2], 10, TopUp::AnyLeftover);
        let a = stratified_sample(pool([5; 5]), |i| i.domain, &plan, &mut make_rng(Some(42))).0;
        let b = stratified_sample(pool([5; 5]), |i| i.domain, &plan, &mut make_rng(Some(42))).0;
        assert_eq!(a, b);
    }

    #[test]
    fn small_total_keeps_blueprint_proportions() {
        let items = pool([100; 5]);
        let plan = plan([36, 72, 39, 87, 66], 50, TopUp::AnyLeftover);
        let (sample, report) = stratified_sample(items, |i| i.domain, &plan, &mut make_rng(Some(1)));
        assert_eq!(sample.len(), 50);

        let per_domain = report.per_domain();
        for d in Domain::ALL {
            let share = 50.0 * plan.targets.get(d) as f64 / 300.0;
            let got = per_domain[&d] as f64;
            assert!((got - share).abs() <= 1.0, "domain {d}: {got} vs {share}");
        }
        assert!(per_domain[&Domain::Four] > per_domain[&Domain::One]);
    }

    #[test]
    fn scaled_targets_sum_to_total() {
        let targets = DomainTargets([36, 72, 39, 87, 66]);
        for total in [0, 1, 4, 50, 123, 299] {
            assert_eq!(targets.scaled_to(total).sum(), total);
        }
        assert_eq!(targets.scaled_to(300), targets);
        assert_eq!(targets.scaled_to(500), targets);
        // 1.6 each: floors of 1, leftovers to the lowest domains.
        assert_eq!(DomainTargets([2; 5]).scaled_to(8), DomainTargets([2, 2, 2, 1, 1]));
    }
}
