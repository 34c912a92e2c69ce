use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use staffhub_auth::{ClinicLocation, Role, Viewer};
use staffhub_core::StaffId;
use staffhub_directory::{
    Department, PermissionMatrix, PermissionRule, ProfileField, StaffProfile, VisibilityPolicy, visible_roster,
};

fn roster(size: usize) -> Vec<StaffProfile> {
    let locations = ["Burnaby", "Richmond", "Surrey"];
    (0..size)
        .map(|i| {
            let department = Department::KNOWN[i % Department::KNOWN.len()];
            let mut p = StaffProfile::new(StaffId::new(), format!("Staff {i}"), department);
            p.clinic_locations.insert(ClinicLocation::new(locations[i % locations.len()]));
            p.phone = Some("604-555-0100".to_string());
            p.bio = Some("bio".to_string());
            p
        })
        .collect()
}

fn matrix() -> PermissionMatrix {
    let mut rules = Vec::new();
    for role in Role::ALL {
        for (i, department) in Department::KNOWN.into_iter().enumerate() {
            rules.push(PermissionRule {
                viewer_role: role,
                target_department: department,
                can_view: i % 3 != 0,
                visible_fields: [ProfileField::Bio].into(),
            });
        }
    }
    PermissionMatrix::from_rules(rules)
}

fn bench_visible_roster(c: &mut Criterion) {
    let mut group = c.benchmark_group("visible_roster");
    let policy = VisibilityPolicy::default();
    let matrix = matrix();
    let viewer = Viewer::new(
        StaffId::new(),
        [Role::Management, Role::ClinicalProvider],
        [ClinicLocation::new("Burnaby")],
    );

    for size in [50usize, 500, 5_000] {
        let roster = roster(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &roster, |b, roster| {
            b.iter(|| visible_roster(&policy, &viewer, &matrix, black_box(roster)));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_visible_roster);
criterion_main!(benches);
