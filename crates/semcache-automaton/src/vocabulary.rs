// Built-in keyword vocabulary and word-list parsing

/// Lowercase technology and tool keywords used to tag LLM responses.
///
/// Grouped as programming languages, frameworks, databases, collaboration
/// and DevOps tools, and cloud services. Several entries contain symbols or
/// spaces (`c++`, `asp.net`, `google cloud`); they match as whole words like
/// any other keyword.
pub const TECHNOLOGY_KEYWORDS: &[&str] = &[
    // Languages
    "java", "rust", "c", "cpp", "c++", "c#", "javascript", "typescript", "python", "bash",
    "ruby", "php", "sql", "kotlin", "go", "swift", "r", "dart", "scala", "perl", "lua",
    "objective-c", "powershell", "basic", "haskell", "elixir", "f#", "ocaml", "vimscript",
    "odin", "zig", "assembly", "markdown", "html", "css", "cobol", "matlab", "dreamberd",
    "holyc",
    // Frameworks
    "spring", "hibernate", "jakarta-ee", "actix", "rocket", "qt", "boost", "dotnet",
    "asp.net", "react", "angular", "vue", "svelte", "next.js", "nuxt.js", "express",
    "nest.js", "django", "flask", "fastapi", "pyramid", "rails", "sinatra", "laravel",
    "symfony", "codeigniter", "cakephp", "ktor", "gin", "echo", "fiber", "vapor", "kitura",
    "perfect", "shiny", "plumber", "flutter", "play", "akka", "mojolicious", "catalyst",
    "dancer", "luvit", "openresty", "cocoa", "psframework", "yesod", "snap", "phoenix",
    "suave", "giraffe", "ocaml-lwt",
    // Databases
    "mysql", "postgresql", "oracle", "mssql", "mongodb", "redis", "cassandra", "mariadb",
    "sqlite", "elasticsearch",
    // Tools
    "postman", "trello", "slack", "jira", "confluence", "github", "gitlab", "bitbucket",
    "docker", "kubernetes", "terraform", "jenkins",
    // Cloud
    "aws", "azure", "google cloud", "ibm cloud", "oracle cloud", "digitalocean", "s3", "ec2",
    "ecs", "lambda", "fargate", "azure devops", "azure functions", "google compute engine",
    "google app engine", "firebase", "cloud run", "e3",
];

/// Parse a newline-separated keyword list.
///
/// Entries are trimmed; blank lines and lines starting with `#` are skipped.
/// Keywords that legitimately start with `#` cannot be expressed in this
/// format.
pub fn parse_word_list(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn technology_keywords_are_lowercase_ascii() {
        for keyword in TECHNOLOGY_KEYWORDS {
            assert!(keyword.is_ascii(), "{keyword}");
            assert_eq!(*keyword, keyword.to_lowercase());
            assert!(!keyword.is_empty());
        }
    }

    #[test]
    fn technology_keywords_are_unique() {
        let mut sorted: Vec<&str> = TECHNOLOGY_KEYWORDS.to_vec();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), TECHNOLOGY_KEYWORDS.len());
    }

    #[test]
    fn parse_skips_comments_and_blanks() {
        let list = "# languages\njava\n\n  rust  \n# tools\ndocker\n";
        assert_eq!(parse_word_list(list), vec!["java", "rust", "docker"]);
    }

    #[test]
    fn parse_keeps_inner_spaces() {
        assert_eq!(parse_word_list("google cloud\r\n"), vec!["google cloud"]);
    }

    #[test]
    fn parse_empty() {
        assert!(parse_word_list("").is_empty());
    }
}
