
use crate::StudentRecord;

const HEADERS: [&str; 5] = ["#", "Name", "ID", "Email", "Contact"];

fn row(index: usize, student: &StudentRecord) -> [String; 5] {
    [
        index.to_string(),
        student.name().to_string(),
        student.student_id().to_string(),
        student.email().to_string(),
        student.contact().to_string(),
    ]
}

pub fn table(students: &[StudentRecord]) -> String {
    if students.is_empty() {
        return String::from("No students yet.\n");
    }

    let rows: Vec<[String; 5]> = students.iter().enumerate().map(|(i, s)| row(i, s)).collect();
    let mut widths = HEADERS.map(|h| h.chars().count());
    for cells in &rows {
        for (width, cell) in widths.iter_mut().zip(cells) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    let mut push_line = |cells: &[&str]| {
        let line = cells
            .iter()
            .zip(widths)
            .map(|(cell, width)| format!("{cell:<width$}"))
            .collect::<Vec<_>>()
            .join("  ");
        out.push_str(line.trim_end());
        out.push('\n');
    };

    push_line(&HEADERS);
    for cells in &rows {
        push_line(&cells.each_ref().map(String::as_str));
    }
    out
}

pub fn record(index: usize, student: &StudentRecord) -> String {
    format!(
        "#{index}\n  Name:    {}\n  ID:      {}\n  Email:   {}\n  Contact: {}\n",
        student.name(),
        student.student_id(),
        student.email(),
        student.contact()
    )
}
