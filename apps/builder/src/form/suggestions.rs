use std::fmt;

use clap::ValueEnum;

use crate::models::Resume;

pub const SKILL_OPTIONS: &[&str] = &[
    "HTML",
    "CSS",
    "Bootstrap",
    "JavaScript",
    "React JS",
    "Node JS",
    "Express JS",
    "MongoDB",
    "SQL",
    "Spring Boot",
    "SQL Server",
    "Python",
    "Java",
    "PHP",
    "C",
    "C++",
    "C#",
    "Ruby",
    "Swift",
    "Kotlin",
    "Dart",
    "Flutter",
    "Android",
    "iOS",
    "Machine Learning",
    "Deep Learning",
    "Data Science",
    "Artificial Intelligence",
    "Cloud Computing",
    "DevOps",
    "Cyber Security",
    "Blockchain",
    "Internet of Things",
    "AR/VR",
    "Game Development",
    "UI/UX Design",
    "Graphic Design",
    "Digital Marketing",
    "SEO",
    "Content Writing",
    "Social Media Marketing",
    "Email Marketing",
    "Affiliate Marketing",
    "PPC",
    "Google Ads",
    "React Native",
    "Angular",
    "Vue JS",
    "SASS",
    "Material UI",
    "Tailwind CSS",
    "jQuery",
    "DBMS",
    "OOPS",
    "Data Structures",
    "J2EE",
    "JSP",
    "Servlets",
    "Spring MVC",
    ".Net",
    "ASP.NET",
];

pub const LANGUAGE_OPTIONS: &[&str] = &[
    "Hindi",
    "Gujarati",
    "English",
    "Marathi",
    "Bengali",
    "Punjabi",
    "Tamil",
    "Telugu",
    "Malayalam",
    "Kannada",
    "Urdu",
    "Odia",
    "Assamese",
    "Maithili",
    "Sanskrit",
    "Dogri",
    "Manipuri",
    "Bodo",
    "Santhali",
    "Kashmiri",
    "Sindhi",
    "Nepali",
    "Bhili/Bhilodi",
    "Santali",
];

pub const HOBBY_OPTIONS: &[&str] = &[
    "Trading",
    "Dancing",
    "Learning",
    "Music",
    "Reading",
    "Writing",
    "Cooking",
    "Traveling",
    "Photography",
    "Gardening",
    "Gaming",
    "Sports",
    "Fitness",
    "Yoga",
    "Meditation",
    "Painting",
    "Drawing",
    "Crafting",
    "Volunteering",
    "Blogging",
    "Podcasting",
    "Coding",
    "Hiking",
    "Cycling",
    "Fishing",
    "Camping",
    "Surfing",
    "Skiing",
    "Snowboarding",
    "Rock Climbing",
    "Martial Arts",
    "Karate",
    "Taekwondo",
    "Judo",
    "Boxing",
    "Wrestling",
];

/// The three multi-select tag lists of a resume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TagList {
    Skills,
    Languages,
    Hobbies,
}

impl TagList {
    pub fn as_str(&self) -> &'static str {
        match self {
            TagList::Skills => "skills",
            TagList::Languages => "languages",
            TagList::Hobbies => "hobbies",
        }
    }

    pub fn vocabulary(&self) -> &'static [&'static str] {
        match self {
            TagList::Skills => SKILL_OPTIONS,
            TagList::Languages => LANGUAGE_OPTIONS,
            TagList::Hobbies => HOBBY_OPTIONS,
        }
    }
}

impl fmt::Display for TagList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Vocabulary entries matching `query` (case-insensitive substring) that are
/// not already selected. Selected values are compared case-insensitively.
pub fn suggest(list: TagList, selected: &[String], query: &str) -> Vec<&'static str> {
    let query = query.trim().to_lowercase();
    list.vocabulary()
        .iter()
        .copied()
        .filter(|option| option.to_lowercase().contains(&query))
        .filter(|option| !selected.iter().any(|s| s.eq_ignore_ascii_case(option)))
        .collect()
}

impl Resume {
    pub fn tags(&self, list: TagList) -> &[String] {
        match list {
            TagList::Skills => &self.skills,
            TagList::Languages => &self.languages,
            TagList::Hobbies => &self.hobbies,
        }
    }

    /// Replaces a tag list as given. Values outside the vocabulary and
    /// repeated values are kept.
    pub fn set_tags(&mut self, list: TagList, values: Vec<String>) {
        let slot = match list {
            TagList::Skills => &mut self.skills,
            TagList::Languages => &mut self.languages,
            TagList::Hobbies => &mut self.hobbies,
        };
        *slot = values;
    }
}
