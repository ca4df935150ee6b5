//! 示例简历
//!
//! 提交页上固定的四个示例按钮，字母同时也是该简历的评分

use phf::phf_map;

/// 示例简历
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExampleResume {
    pub letter: &'static str,
    pub name: &'static str,
}

impl ExampleResume {
    /// 示例文件路径，例如 `public/s_resume.pdf`
    pub fn path(&self) -> String {
        example_path(self.letter)
    }

    /// 按钮上显示的评分
    pub fn grade_label(&self) -> String {
        format!("Grade: {}", self.letter.to_uppercase())
    }
}

/// 按钮顺序
pub const EXAMPLE_RESUMES: [ExampleResume; 4] = [
    ExampleResume { letter: "s", name: "Victor Vigon" },
    ExampleResume { letter: "a", name: "Gabriel Benmergui" },
    ExampleResume { letter: "b", name: "Horacio Consultora" },
    ExampleResume { letter: "c", name: "Claudia Alves" },
];

static EXAMPLE_NAMES: phf::Map<&'static str, &'static str> = phf_map! {
    "s" => "Victor Vigon",
    "a" => "Gabriel Benmergui",
    "b" => "Horacio Consultora",
    "c" => "Claudia Alves",
};

/// 按字母查找示例
pub fn find_example(letter: &str) -> Option<ExampleResume> {
    EXAMPLE_NAMES
        .get_entry(letter)
        .map(|(letter, name)| ExampleResume {
            letter: *letter,
            name: *name,
        })
}

pub fn example_path(letter: &str) -> String {
    format!("public/{}_resume.pdf", letter)
}

/// 是否为示例文件路径（`public/*_resume.pdf`）
pub fn is_example_path(url: &str) -> bool {
    url.starts_with("public/") && url.ends_with("_resume.pdf")
}
