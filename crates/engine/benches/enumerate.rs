use criterion::{criterion_group, criterion_main, Criterion};
use routine_core::FirstCandidate;
use routine_engine::RoutinePlanner;
use types::{Day, Meeting, MeetingKind, RoutineRequest, Section};

fn synthetic_catalog() -> Vec<Section> {
    let days = [Day::Sunday, Day::Monday, Day::Tuesday, Day::Wednesday, Day::Thursday];
    let slots: [(u16, u16); 5] = [(480, 560), (570, 650), (660, 740), (750, 830), (840, 920)];
    let mut catalog = Vec::new();
    for (ci, course) in ["CSE110", "MAT110", "PHY111"].iter().enumerate() {
        for si in 0..5 {
            catalog.push(Section {
                course_code: course.to_string(),
                course_name: None,
                section_name: format!("{:02}", si + 1),
                section_id: format!("{course}-{si}"),
                instructor: Some(format!("FAC-{ci}-{si}")),
                capacity: 35,
                consumed_seats: 0,
                meetings: vec![
                    Meeting {
                        kind: MeetingKind::Class,
                        day: days[si],
                        start_min: slots[ci].0,
                        end_min: slots[ci].1,
                        room: "UB-101".into(),
                        instructor: format!("FAC-{ci}-{si}"),
                    },
                    Meeting {
                        kind: MeetingKind::Class,
                        day: days[(si + 2) % 5],
                        start_min: slots[ci].0,
                        end_min: slots[ci].1,
                        room: "UB-101".into(),
                        instructor: format!("FAC-{ci}-{si}"),
                    },
                ],
                exams: vec![],
            });
        }
    }
    catalog
}

fn bench_generate(c: &mut Criterion) {
    let rt = tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap();
    let catalog = synthetic_catalog();
    let planner = RoutinePlanner::new(FirstCandidate);
    let manual = RoutineRequest {
        courses: vec!["CSE110".into(), "MAT110".into(), "PHY111".into()],
        days: Day::ALL.iter().map(|d| d.token().to_string()).collect(),
        times: routine_core::windows::TIME_SLOT_CATALOG
            .iter()
            .map(|s| s.to_string())
            .collect(),
        commute_preference: None,
        use_ai: false,
    };
    let ranked = RoutineRequest {
        use_ai: true,
        commute_preference: Some("far".into()),
        ..manual.clone()
    };

    c.bench_function("manual_first_fit", |b| {
        b.iter(|| rt.block_on(planner.generate(&catalog, &manual)).unwrap())
    });
    c.bench_function("ranked_full_enumeration", |b| {
        b.iter(|| rt.block_on(planner.generate(&catalog, &ranked)).unwrap())
    });
}

criterion_group!(benches, bench_generate);
criterion_main!(benches);
