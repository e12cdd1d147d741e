//! Static copy shown on the portfolio page.

pub const OWNER_NAME: &str = "Arshad Anwar";
pub const HERO_FIRST_NAME: &str = "ARSHAD";
pub const HERO_LAST_NAME: &str = "ANWAR";
pub const TAGLINE: &str = "Founder & Full-Stack Developer at Legal Success India";
pub const SIGNATURE: &str = "A";
pub const CONTACT_EMAIL: &str = "arshad@legalsuccessindia.com";
pub const CONTACT_INTRO: &str = "Have a project in mind? Let's build something great together.";

pub const TECHNOLOGIES: [&str; 6] = [
    "React",
    "Next.js",
    "JavaScript",
    "TypeScript",
    "Python",
    "Node.js",
];

pub const ABOUT_GREETING: &str = "Hi, I\u{2019}m Arshad Anwar.";
pub const ABOUT_PARAGRAPHS: [&str; 2] = [
    "Founder of Legal Success India and a passionate full-stack developer specializing in legal-tech solutions.",
    "With a unique blend of legal expertise and advanced web development skills, I build products that streamline complex legal processes for businesses and individuals. I believe in creating scalable, high-performance websites that not only look good but solve real-world problems.",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkillGroup {
    pub title: &'static str,
    pub skills: &'static str,
}

pub const SKILL_GROUPS: [SkillGroup; 2] = [
    SkillGroup {
        title: "Frontend",
        skills: "React, Next.js, TypeScript, Tailwind CSS",
    },
    SkillGroup {
        title: "Backend",
        skills: "Python, Node.js, PostgreSQL, MongoDB",
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Project {
    pub title: &'static str,
    pub url: &'static str,
    pub summary: &'static str,
    pub tags: [&'static str; 3],
}

pub const PROJECTS: [Project; 3] = [
    Project {
        title: "Legal Success India",
        url: "https://legalsuccessindia.com/",
        summary: "A comprehensive legal-tech platform simplifying legal aid access and connecting clients with legal professionals.",
        tags: ["Next.js", "React", "Python"],
    },
    Project {
        title: "Khurak Application",
        url: "https://khurak-new-application.vercel.app/",
        summary: "A modern food delivery and restaurant management application with real-time features.",
        tags: ["React", "Next.js", "Vercel"],
    },
    Project {
        title: "Legal Success India v2",
        url: "https://legal-success-indiaa-new-work-azf3.vercel.app/",
        summary: "Enhanced version of the legal platform with improved UI/UX and additional features for legal professionals.",
        tags: ["Next.js", "TypeScript", "Tailwind"],
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Service {
    pub title: &'static str,
    pub summary: &'static str,
}

pub const SERVICES: [Service; 3] = [
    Service {
        title: "Web Development",
        summary: "Custom, high-performance websites built with modern technologies like React and Next.js.",
    },
    Service {
        title: "Legal-Tech Solutions",
        summary: "Specialized software for legal compliance, data protection, and automation.",
    },
    Service {
        title: "Maintenance",
        summary: "Ongoing support, security updates, and performance optimization.",
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Testimonial {
    pub quote: &'static str,
    pub author: &'static str,
    pub organisation: &'static str,
}

pub const TESTIMONIAL: Testimonial = Testimonial {
    quote: "Arshad Anwar's expertise in both legal processes and modern web development is exceptional. The legal-tech platform he developed for our firm has streamlined our case management and improved client satisfaction significantly. His attention to detail and understanding of compliance requirements is outstanding.",
    author: "Managing Partner",
    organisation: "Delhi High Court Bar Association",
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SocialLink {
    pub label: &'static str,
    pub href: &'static str,
}

pub const SOCIAL_LINKS: [SocialLink; 4] = [
    SocialLink {
        label: "LinkedIn",
        href: "#",
    },
    SocialLink {
        label: "GitHub",
        href: "#",
    },
    SocialLink {
        label: "Twitter",
        href: "#",
    },
    SocialLink {
        label: "Email",
        href: "mailto:arshad@legalsuccessindia.com",
    },
];
