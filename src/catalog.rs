//! Canonical default milestone catalog.
//!
//! Seeded into a user's document on first read. Ids, titles, ordering and
//! reference links are fixed; only the `completed` flag changes afterwards.

use crate::types::{Milestone, MilestoneCategory, MilestoneLink};

fn link(text: &str, url: &str) -> MilestoneLink {
    MilestoneLink {
        text: text.to_string(),
        url: url.to_string(),
    }
}

fn milestone(
    id: u32,
    category: MilestoneCategory,
    title: &str,
    description: &str,
    links: Vec<MilestoneLink>,
    sub_items: Vec<&str>,
) -> Milestone {
    Milestone {
        id,
        title: title.to_string(),
        description: description.to_string(),
        completed: false,
        category,
        links: if links.is_empty() { None } else { Some(links) },
        sub_items: if sub_items.is_empty() {
            None
        } else {
            Some(sub_items.into_iter().map(str::to_string).collect())
        },
    }
}

pub fn default_milestones() -> Vec<Milestone> {
    vec![
        milestone(
            1,
            MilestoneCategory::Initial,
            "Reach out and contact your ED nursing leadership",
            "Contact manager, educator, director and physician partners (medical director)",
            vec![link(
                "Email template",
                "https://docs.google.com/document/d/14QcAO6S8llniLOKo-NoIuwDpYgo63GCN/edit",
            )],
            vec![],
        ),
        milestone(
            2,
            MilestoneCategory::Initial,
            "Share information about Pediatric Readiness",
            "Review key documents and resources about pediatric readiness",
            vec![
                link(
                    "Joint Policy Statement",
                    "https://publications.aap.org/pediatrics/article/142/5/e20182459/38608/Pediatric-Readiness-in-the-Emergency-Department?autologincheck=redirected",
                ),
                link(
                    "Pediatric Readiness Assessment",
                    "https://emscimprovement.center/domains/pediatric-readiness-project/assessment/",
                ),
                link(
                    "Pediatric Readiness Saves Lives",
                    "https://media.emscimprovement.center/documents/Pediatric_Readiness_Outcomes_-_2023_Q5q8cow.pdf%5C",
                ),
                link(
                    "Importance of the PECC",
                    "https://emscimprovement.center/domains/pecc/",
                ),
            ],
            vec![],
        ),
        milestone(
            3,
            MilestoneCategory::Initial,
            "Identify PECC or champion and sign community ED commitment letter",
            "Complete and sign the commitment letter for your ED",
            vec![link(
                "commitment letter",
                "https://docs.google.com/document/d/1zuOqjQEjMox9fykO4Lgj0tNfk0TXufJtcozLX0_ATQM/edit?tab=t.0",
            )],
            vec![],
        ),
        milestone(
            4,
            MilestoneCategory::Initial,
            "Review PECC Job Description",
            "Review the detailed PECC role description and responsibilities",
            vec![link(
                "PECC Job Description",
                "https://docs.google.com/document/d/1yCFW_TC7P4__N19HT0mHilmMLHLREeiwcuOMXJoYpCE/edit",
            )],
            vec![],
        ),
        milestone(
            5,
            MilestoneCategory::Initial,
            "Review EHC modules",
            "Review the 7 domains of pediatric readiness",
            vec![
                link(
                    "EIIC Modules",
                    "https://emscimprovement.center/domains/pecc/pecc-module-ed/",
                ),
                link(
                    "module 1",
                    "https://ppn.h5p.com/content/1292018380989833718/embed",
                ),
                link(
                    "module 2",
                    "https://ppn.h5p.com/content/1292113550579127778#h5pbookid=1292113550579127778&chapter=h5p-interactive-book-chapter-3295f90f-7c82-4a4e-93b4-52822046d715&section=0",
                ),
                link(
                    "module 3",
                    "https://ppn.h5p.com/content/1292324953257974388#h5pbookid=1292324953257974388&chapter=h5p-interactive-book-chapter-7f3cc07a-615b-4a53-9870-47a92b004604&section=0",
                ),
                link(
                    "module 4",
                    "https://emscimprovement.center/domains/pecc/pecc-module-ed/module-4-safety/",
                ),
            ],
            vec![],
        ),
        milestone(
            6,
            MilestoneCategory::Ongoing,
            "Regular Monthly Activities",
            "Ongoing monthly tasks and reviews",
            vec![link("ImPACTS Website", "https://www.impactscollaborative.com/")],
            vec![
                "Regularly review Activity Log",
                "Meet monthly with all PECCs in program",
                "Continue to share existing resources and request need for resources through ImPACTS and PECC cohort via Zulip",
            ],
        ),
        milestone(
            7,
            MilestoneCategory::Prs,
            "Pediatric Readiness Score Submission",
            "Complete PRS requirements and updates",
            vec![
                link("Pediatric Readiness Score", "https://pedsready.org/"),
                link("NPRQI", "https://emscimprovement.center/engage/nprqi/"),
            ],
            vec![
                "Complete Pediatric Readiness Score (PRS) on ED site",
                "Update gap assessment status and action plans",
                "PECC will enter the PRS on the National Pediatric Readiness Project website for official score",
            ],
        ),
        milestone(
            8,
            MilestoneCategory::Equipment,
            "Equipment, Medication and Supplies I",
            "Complete initial equipment assessment",
            vec![
                link(
                    "ED Checklist",
                    "https://emscimprovement.center/domains/pediatric-readiness-project/readiness-toolkit/readiness-ED-checklist/",
                ),
                link("SimBox", "https://www.emergencysimbox.com/"),
            ],
            vec![],
        ),
        milestone(
            9,
            MilestoneCategory::PatientSafety,
            "Patient Safety Resources",
            "Review and implement patient safety tools",
            vec![
                link(
                    "EIIC Templates",
                    "https://emscimprovement.center/domains/pediatric-readiness-project/readiness-toolkit/readiness-toolkit-checklist/safety/",
                ),
                link("PediStat", "https://www.pedi-stat.com/"),
                link("HandTevy", "https://www.handtevy.com/"),
                link("SafeDose", "https://www.safedoseinc.com/"),
                link("Sim!", "http://emergencysimbox.com/"),
            ],
            vec!["PediStat", "HandTevy", "SafeDose"],
        ),
        milestone(
            10,
            MilestoneCategory::Policies,
            "Policies, Procedures, and Protocols",
            "Review and implement policies and procedures",
            vec![
                link(
                    "Templates",
                    "https://emscimprovement.center/domains/pediatric-readiness-project/readiness-toolkit/readiness-toolkit-checklist/policies/",
                ),
                link("Sim!", "http://emergencysimbox.com/"),
            ],
            vec![
                "Medical direction support",
                "ED leadership support",
                "Policy Committee",
                "IT support through charting system or electronic policy system",
            ],
        ),
        milestone(
            11,
            MilestoneCategory::Staffing,
            "Physician and Nurse Staffing and Training Milestones",
            "Complete staffing and training requirements",
            vec![
                link(
                    "Simulation/Education Guide",
                    "https://docs.google.com/presentation/d/11CSEQ14iSZ8YD6GSA5WJUpuOI7drQckp/edit?usp=sharing&ouid=116288827536997281890&rtpof=true&sd=true",
                ),
                link("SimBox", "http://emergencysimbox.com/"),
            ],
            vec![],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_is_stable() {
        let catalog = default_milestones();
        assert_eq!(catalog.len(), 11);
        let ids: Vec<u32> = catalog.iter().map(|m| m.id).collect();
        assert_eq!(ids, (1..=11).collect::<Vec<u32>>());
        assert!(catalog.iter().all(|m| !m.completed));
        assert_eq!(catalog[0].category, MilestoneCategory::Initial);
        assert_eq!(catalog[6].category, MilestoneCategory::Prs);
        assert_eq!(
            catalog[5].sub_items.as_ref().map(Vec::len),
            Some(3),
            "ongoing milestone carries its sub-tasks"
        );
    }
}
