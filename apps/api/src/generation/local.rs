//! Deterministic content generation: template assembly driven by matched
//! JD keywords. No network, no failure path: any keyword list (including an
//! empty one) produces output.

use tracing::{debug, warn};

/// Opening sentence of every locally generated summary.
pub const SUMMARY_BASE: &str = "Innovative Software Developer with 2.5+ years of experience in creating secure and scalable applications. Developed backend services using Python, Django, and Flask, improving system performance and user engagement.";

/// Closing sentence, appended unconditionally.
pub const SUMMARY_CLOSING: &str = "Seeking a Software Developer role to enhance software solutions through expertise in Python, RESTful API development, and cloud integration.";

pub const BULLET_GLYPH: &str = "•";
pub const MAX_BULLETS: usize = 5;

/// One summary clause, added once if any trigger keyword matched.
struct KeywordClause {
    triggers: &'static [&'static str],
    clause: &'static str,
}

static SUMMARY_CLAUSES: [KeywordClause; 5] = [
    KeywordClause {
        triggers: &["aws", "cloud"],
        clause: "Experienced with AWS cloud services and containerization technologies.",
    },
    KeywordClause {
        triggers: &["api", "rest"],
        clause: "Specialized in RESTful API development and microservices architecture.",
    },
    KeywordClause {
        triggers: &["machine learning", "ml", "ai"],
        clause: "Interested in applying AI/ML technologies to solve complex problems.",
    },
    KeywordClause {
        triggers: &["java", "spring"],
        clause: "Adaptable to Java and Spring framework development.",
    },
    KeywordClause {
        triggers: &["devops", "ci/cd"],
        clause: "Experienced with DevOps practices and CI/CD pipeline implementation.",
    },
];

/// Conditional insert into the bullet list. `index` addresses the list as
/// left by the previous rule, not the base list.
struct InsertRule {
    keyword: &'static str,
    index: usize,
    bullet: &'static str,
}

struct ExperiencePlaybook {
    /// Lower-case fragment looked up in the company display name.
    company_key: &'static str,
    base: [&'static str; 5],
    rules: [InsertRule; 3],
}

static PLAYBOOKS: [ExperiencePlaybook; 2] = [
    ExperiencePlaybook {
        company_key: "ipsos",
        base: [
            "Developed backend services using Python with Django and Flask for unified data platform",
            "Designed and implemented scalable features for data ingestion and ETL pipelines",
            "Built RESTful APIs using Flask and Django REST Framework for data management",
            "Enhanced resource efficiency by designing distributed task workflows with Celery",
            "Reduced manual configuration by 40% through automated end-to-end workflows",
        ],
        rules: [
            InsertRule {
                keyword: "aws",
                index: 2,
                bullet: "Deployed applications on AWS using containerization and cloud services",
            },
            InsertRule {
                keyword: "microservices",
                index: 1,
                bullet: "Architected microservices-based solutions for improved scalability",
            },
            InsertRule {
                keyword: "java",
                index: 3,
                bullet: "Collaborated on Java-based integrations and cross-platform development",
            },
        ],
    },
    ExperiencePlaybook {
        company_key: "route",
        base: [
            "Implemented secure authentication mechanisms using JWT tokens and OAuth",
            "Analyzed and optimized source code improving performance by 25%",
            "Integrated PostgreSQL and MySQL databases using SQLAlchemy",
            "Automated deployment pipelines using CI/CD tools like Jenkins and GitLab",
            "Managed datasets with over 1 million records and reduced deployment time by 30%",
        ],
        rules: [
            InsertRule {
                keyword: "docker",
                index: 3,
                bullet: "Containerized applications using Docker for consistent deployment",
            },
            InsertRule {
                keyword: "api",
                index: 1,
                bullet: "Developed and maintained RESTful APIs serving millions of requests",
            },
            InsertRule {
                keyword: "devops",
                index: 4,
                bullet: "Implemented DevOps best practices for continuous integration and deployment",
            },
        ],
    },
];

fn has_keyword(keywords: &[String], keyword: &str) -> bool {
    keywords.iter().any(|k| k == keyword)
}

/// Builds a tailored summary: base sentence, one clause per matching
/// keyword group (in group order), closing sentence.
pub fn local_summary(keywords: &[String]) -> String {
    let mut sentences = vec![SUMMARY_BASE];

    for group in &SUMMARY_CLAUSES {
        if group.triggers.iter().any(|t| has_keyword(keywords, t)) {
            sentences.push(group.clause);
        }
    }

    sentences.push(SUMMARY_CLOSING);
    debug!("Local summary assembled from {} sentences", sentences.len());
    sentences.join(" ")
}

/// Builds up to `MAX_BULLETS` tailored bullets for the named company.
///
/// Returns an empty string when the company has no playbook.
pub fn local_experience(company_name: &str, keywords: &[String]) -> String {
    let company_lower = company_name.to_lowercase();
    let Some(playbook) = PLAYBOOKS
        .iter()
        .find(|p| company_lower.contains(p.company_key))
    else {
        warn!("No local experience playbook for company {company_name:?}");
        return String::new();
    };

    let mut bullets: Vec<&str> = playbook.base.to_vec();
    for rule in &playbook.rules {
        if has_keyword(keywords, rule.keyword) {
            let index = rule.index.min(bullets.len());
            bullets.insert(index, rule.bullet);
        }
    }
    bullets.truncate(MAX_BULLETS);

    render_bullets(&bullets)
}

fn render_bullets(bullets: &[&str]) -> String {
    bullets
        .iter()
        .map(|b| format!("{BULLET_GLYPH} {b}"))
        .collect::<Vec<_>>()
        .join("\n")
}
