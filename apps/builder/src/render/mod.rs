// Resume preview: two layouts rendered to Markdown, plus export to disk.
// Both layouts share the block writers below and differ only in ordering.

use std::fmt;
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use tracing::info;

use crate::form::dates::parse_date;
use crate::models::{Certification, Education, Experience, Project, Resume};

pub const EXPORT_FILE_NAME: &str = "My_Resume.md";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Layout {
    /// Contact, education and experience first, then everything else.
    #[default]
    Classic,
    /// Tag lists up front, followed by the long-form sections.
    Compact,
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Layout::Classic => f.write_str("classic"),
            Layout::Compact => f.write_str("compact"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Block {
    Contact,
    Summary,
    Education,
    Experience,
    Projects,
    Certifications,
    Skills,
    Languages,
    Hobbies,
}

impl Layout {
    fn blocks(&self) -> &'static [Block] {
        match self {
            Layout::Classic => &[
                Block::Contact,
                Block::Education,
                Block::Experience,
                Block::Summary,
                Block::Skills,
                Block::Projects,
                Block::Certifications,
                Block::Languages,
                Block::Hobbies,
            ],
            Layout::Compact => &[
                Block::Contact,
                Block::Skills,
                Block::Languages,
                Block::Hobbies,
                Block::Education,
                Block::Summary,
                Block::Experience,
                Block::Projects,
                Block::Certifications,
            ],
        }
    }
}

/// Renders the resume as a Markdown document in the given layout.
/// Empty sections and untouched blank entries are left out.
pub fn render(resume: &Resume, layout: Layout) -> String {
    let mut md = format!("# {}\n", resume.name);
    if !resume.title.is_empty() {
        md.push_str(&format!("**{}**\n", resume.title));
    }
    md.push('\n');

    for block in layout.blocks() {
        match block {
            Block::Contact => write_contact(&mut md, resume),
            Block::Summary => {
                if !resume.summary.is_empty() {
                    md.push_str(&format!("## Summary\n\n{}\n\n", resume.summary));
                }
            }
            Block::Education => write_entries(&mut md, "Education", &resume.education, education),
            Block::Experience => {
                write_entries(&mut md, "Experience", &resume.experiences, experience)
            }
            Block::Projects => write_entries(&mut md, "Projects", &resume.projects, project),
            Block::Certifications => write_entries(
                &mut md,
                "Certifications",
                &resume.certifications,
                certification,
            ),
            Block::Skills => write_tags(&mut md, "Skills", &resume.skills),
            Block::Languages => write_tags(&mut md, "Languages", &resume.languages),
            Block::Hobbies => write_tags(&mut md, "Hobbies", &resume.hobbies),
        }
    }
    md.truncate(md.trim_end().len());
    md.push('\n');
    md
}

/// Writes the rendered resume to `My_Resume.md` inside `dir`.
pub fn export(resume: &Resume, layout: Layout, dir: &Path) -> std::io::Result<PathBuf> {
    let path = dir.join(EXPORT_FILE_NAME);
    std::fs::write(&path, render(resume, layout))?;
    info!("Exported {layout} resume to {}", path.display());
    Ok(path)
}

fn write_contact(md: &mut String, resume: &Resume) {
    let lines: Vec<&str> = [
        &resume.email,
        &resume.phone,
        &resume.address,
        &resume.github,
        &resume.website,
    ]
    .into_iter()
    .map(String::as_str)
    .filter(|s| !s.is_empty())
    .collect();
    if lines.is_empty() {
        return;
    }
    md.push_str("## Contact\n\n");
    for line in lines {
        md.push_str(&format!("- {line}\n"));
    }
    md.push('\n');
}

fn write_tags(md: &mut String, title: &str, tags: &[String]) {
    if tags.is_empty() {
        return;
    }
    md.push_str(&format!("## {title}\n\n{}\n\n", tags.join(" · ")));
}

fn write_entries<E: Default + PartialEq>(
    md: &mut String,
    title: &str,
    entries: &[E],
    write: fn(&mut String, &E),
) {
    let filled: Vec<&E> = entries.iter().filter(|e| **e != E::default()).collect();
    if filled.is_empty() {
        return;
    }
    md.push_str(&format!("## {title}\n\n"));
    for entry in filled {
        write(md, entry);
        md.push('\n');
    }
}

fn experience(md: &mut String, e: &Experience) {
    md.push_str(&format!("### {} | {}\n", e.position, e.company));
    md.push_str(&format!("_{}_\n", date_range(&e.start_date, &e.end_date)));
    if !e.description.is_empty() {
        md.push_str(&format!("\n{}\n", e.description));
    }
}

fn project(md: &mut String, p: &Project) {
    md.push_str(&format!("### {}\n", p.title));
    md.push_str(&format!("_{}_\n", date_range(&p.start_date, &p.end_date)));
    if !p.description.is_empty() {
        md.push_str(&format!("\n{}\n", p.description));
    }
    if !p.technologies.is_empty() {
        md.push_str(&format!("\n**Tech:** {}\n", p.technologies.join(", ")));
    }
    if !p.link.is_empty() {
        md.push_str(&format!("\n<{}>\n", p.link));
    }
}

fn education(md: &mut String, e: &Education) {
    md.push_str(&format!("### {}\n", e.degree));
    md.push_str(&format!("{}\n", e.school));
    md.push_str(&format!("_{}_\n", date_range(&e.start_date, &e.end_date)));
}

fn certification(md: &mut String, c: &Certification) {
    md.push_str(&format!("### {}\n", c.title));
    md.push_str(&format!("{}\n", c.issuer));
    if !c.date.is_empty() {
        md.push_str(&format!("_{}_\n", display_date(&c.date)));
    }
}

fn date_range(start: &str, end: &str) -> String {
    let end = if end.is_empty() {
        "Present".to_string()
    } else {
        display_date(end)
    };
    format!("{} – {}", display_date(start), end)
}

/// `Jan 2020` for parseable dates; anything else is shown as typed.
fn display_date(raw: &str) -> String {
    parse_date(raw)
        .map(|d| d.format("%b %Y").to_string())
        .unwrap_or_else(|| raw.to_string())
}
