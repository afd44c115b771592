//! Printable preview: renders a document as markdown. Never mutates the
//! document and accepts any normalized value, including one with every
//! field blank.

use crate::models::resume::{EducationEntry, ExperienceEntry, ResumeDocument, Skill};

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

// Keyword buckets for the one-line skills grid.
const FRAMEWORK_KEYWORDS: &[&str] = &[
    "react", "next", "django", "flask", "node", "express", "vue", "angular", ".net", "spring",
];
const TOOL_KEYWORDS: &[&str] = &[
    "git", "docker", "aws", "linux", "mysql", "postgres", "sql", "vite", "webpack", "figma",
];
const LANGUAGE_KEYWORDS: &[&str] = &[
    "javascript", "typescript", "python", "java", "c#", "c++", "go",
];

pub fn render_markdown(doc: &ResumeDocument) -> String {
    let mut md = String::new();

    let name = doc.personal.full_name.trim();
    md.push_str(&format!(
        "# {}\n",
        if name.is_empty() { "Your Name" } else { name }
    ));

    let meta = meta_line(doc);
    if !meta.is_empty() {
        md.push_str(&meta);
        md.push('\n');
    }

    if !doc.summary.trim().is_empty() {
        md.push_str("\n## Summary\n\n");
        md.push_str(doc.summary.trim());
        md.push('\n');
    }

    let named: Vec<&Skill> = doc
        .skills
        .iter()
        .filter(|s| !s.name.trim().is_empty())
        .collect();
    if !named.is_empty() {
        md.push_str("\n## Skills\n\n");
        for (title, labels) in bucket_skills(&named) {
            md.push_str(&format!("- **{title}:** {}\n", labels.join(" • ")));
        }
    }

    let visible: Vec<&ExperienceEntry> = doc
        .experience
        .iter()
        .filter(|e| !experience_is_blank(e))
        .collect();
    if !visible.is_empty() {
        md.push_str("\n## Experience\n");
        for entry in visible {
            push_experience(&mut md, entry);
        }
    }

    let visible: Vec<&EducationEntry> = doc
        .education
        .iter()
        .filter(|e| !education_is_blank(e))
        .collect();
    if !visible.is_empty() {
        md.push_str("\n## Education\n");
        for entry in visible {
            push_education(&mut md, entry);
        }
    }

    md
}

fn meta_line(doc: &ResumeDocument) -> String {
    let p = &doc.personal;
    let parts: Vec<String> = [
        (p.city_state.as_str(), None),
        (p.phone.as_str(), None),
        (p.email.as_str(), None),
        (p.linkedin.as_str(), Some("LinkedIn")),
        (p.github.as_str(), Some("GitHub")),
        (p.website.as_str(), Some("Web")),
    ]
    .iter()
    .filter(|(value, _)| !value.trim().is_empty())
    .map(|(value, label)| match label {
        Some(label) => format!("{label}: {}", value.trim()),
        None => value.trim().to_owned(),
    })
    .collect();
    parts.join(" | ")
}

fn bucket_skills(skills: &[&Skill]) -> Vec<(&'static str, Vec<String>)> {
    let mut languages = Vec::new();
    let mut frameworks = Vec::new();
    let mut tools = Vec::new();
    let mut other = Vec::new();

    for skill in skills {
        let lowered = skill.name.to_lowercase();
        let label = if skill.level.trim().is_empty() {
            skill.name.trim().to_owned()
        } else {
            format!("{} ({})", skill.name.trim(), skill.level.trim())
        };
        if FRAMEWORK_KEYWORDS.iter().any(|k| lowered.contains(k)) {
            frameworks.push(label);
        } else if TOOL_KEYWORDS.iter().any(|k| lowered.contains(k)) {
            tools.push(label);
        } else if LANGUAGE_KEYWORDS.iter().any(|k| lowered.contains(k)) {
            languages.push(label);
        } else {
            other.push(label);
        }
    }

    [
        ("Languages", languages),
        ("Frameworks", frameworks),
        ("Tools", tools),
        ("Other", other),
    ]
    .into_iter()
    .filter(|(_, labels)| !labels.is_empty())
    .collect()
}

fn push_experience(md: &mut String, entry: &ExperienceEntry) {
    let position = entry.position.trim();
    let mut title = if position.is_empty() {
        "Position".to_owned()
    } else {
        position.to_owned()
    };
    if !entry.company.trim().is_empty() {
        title.push_str(&format!(", {}", entry.company.trim()));
    }
    md.push_str(&format!("\n### {title}\n"));

    if !entry.city.trim().is_empty() {
        md.push_str(&format!("{}\n", entry.city.trim()));
    }
    let dates = date_range(
        &entry.start_date,
        &entry.end_date,
        entry.currently_employed,
    );
    if !dates.is_empty() {
        md.push_str(&format!("{dates}\n"));
    }
    for line in entry.achievements.iter().filter(|l| !l.trim().is_empty()) {
        md.push_str(&format!("- {}\n", line.trim()));
    }
}

fn push_education(md: &mut String, entry: &EducationEntry) {
    let degree = entry.degree.trim();
    let mut title = if degree.is_empty() {
        "Degree".to_owned()
    } else {
        degree.to_owned()
    };
    if !entry.institution.trim().is_empty() {
        title.push_str(&format!(", {}", entry.institution.trim()));
    }
    md.push_str(&format!("\n### {title}\n"));

    if !entry.city.trim().is_empty() {
        md.push_str(&format!("{}\n", entry.city.trim()));
    }
    let dates = date_range(&entry.start_date, &entry.end_date, false);
    if !dates.is_empty() {
        md.push_str(&format!("{dates}\n"));
    }
    if !entry.details.trim().is_empty() {
        md.push_str(&format!("\n{}\n", entry.details.trim()));
    }
}

fn date_range(start: &str, end: &str, current: bool) -> String {
    let start = format_month(start);
    let end = if current {
        "Present".to_owned()
    } else {
        format_month(end)
    };
    if start.is_empty() && end.is_empty() {
        String::new()
    } else {
        format!("{start} - {end}")
    }
}

/// Formats a `YYYY-MM` value as `Mon YYYY`; anything else passes through.
fn format_month(value: &str) -> String {
    if value.is_empty() {
        return String::new();
    }
    match value.split_once('-') {
        Some((year, month)) => match month.parse::<usize>() {
            Ok(m) if (1..=12).contains(&m) => format!("{} {year}", MONTHS[m - 1]),
            _ => value.to_owned(),
        },
        None => value.to_owned(),
    }
}

fn experience_is_blank(entry: &ExperienceEntry) -> bool {
    entry.position.trim().is_empty()
        && entry.company.trim().is_empty()
        && entry.city.trim().is_empty()
        && date_range(&entry.start_date, &entry.end_date, entry.currently_employed).is_empty()
}

fn education_is_blank(entry: &EducationEntry) -> bool {
    entry.degree.trim().is_empty()
        && entry.institution.trim().is_empty()
        && entry.city.trim().is_empty()
        && date_range(&entry.start_date, &entry.end_date, false).is_empty()
        && entry.details.trim().is_empty()
}
