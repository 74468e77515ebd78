//! Static help guide shown by the `?` popup and `sanitation help-guide`

/// Outbound link back to the business portal
pub const PORTAL_URL: &str = "https://masters-edge-portal.vercel.app";

#[derive(Debug, Clone, Copy)]
pub struct HelpStep {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub description: &'static str,
    pub tip: &'static str,
}

#[derive(Debug, Clone, Copy)]
pub struct HelpGuide {
    pub title: &'static str,
    pub description: &'static str,
    pub intro_title: &'static str,
    pub intro: &'static str,
    pub steps: [HelpStep; 3],
}

pub const GUIDE: HelpGuide = HelpGuide {
    title: "Brand & Sanitation Guide",
    description: "Your daily facility checklist to maintain brand standards and cleanliness.",
    intro_title: "First Impressions Matter",
    intro: "Your facility is your brand. Every dirty mirror, cluttered lobby, or unstocked \
            bathroom tells clients you don't care about the details. This daily checklist \
            ensures your space always reflects the quality of your program.",
    steps: [
        HelpStep {
            title: "Step 1: Work Through the Checklist",
            subtitle: "Check items as you go",
            description: "Open the app each day and work through each category. Tap the \
                          checkbox next to each task as you complete it. Your progress \
                          auto-saves instantly.",
            tip: "Tasks are grouped by area \u{2014} Training Floor, Lobby, Bathrooms, Windows, \
                  etc. Work top to bottom for the fastest routine.",
        },
        HelpStep {
            title: "Step 2: Reset for Tomorrow",
            subtitle: "Fresh start each day",
            description: "Hit the 'Reset for New Day' button to uncheck everything and start \
                          fresh. The app tracks your last completion date so you always know \
                          where you stand.",
            tip: "Pro tip: Reset first thing in the morning so the checklist is ready for \
                  whoever is on cleaning duty.",
        },
        HelpStep {
            title: "Step 3: Track & Export",
            subtitle: "Keep records",
            description: "See your completion percentage at a glance with the progress bar. \
                          Export your checklist status anytime as a text file for records or \
                          team accountability.",
            tip: "Export after completing the checklist to create a daily record. Great for \
                  management reviews and accountability.",
        },
    ],
};

impl HelpGuide {
    /// Guide as plain text, one panel per paragraph
    pub fn to_text(&self) -> String {
        let mut out = format!(
            "{}\n{}\n\n{}\n{}\n",
            self.title, self.description, self.intro_title, self.intro
        );
        for step in &self.steps {
            out.push_str(&format!(
                "\n{}\n  {}\n  {}\n  Tip: {}\n",
                step.title, step.subtitle, step.description, step.tip
            ));
        }
        out
    }
}
