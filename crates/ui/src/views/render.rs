//! Plain-text rendering of screens for the terminal front end.

use std::fmt::{self, Write};

use crate::views::screen::Screen;
use crate::vm::{
    CourseCatalogVm, MentorRosterVm, MentorshipVm, StudentDetailVm, StudentWorkspaceVm,
};

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Screen::Login { message } => {
                writeln!(f, "EduTrack: please log in.")?;
                if let Some(message) = message {
                    writeln!(f, "{message}")?;
                }
                Ok(())
            }
            Screen::Loading => writeln!(f, "Loading dashboard..."),
            Screen::Failed { message } => writeln!(f, "{message}"),
            Screen::StudentWorkspace(vm) => write_workspace(f, vm),
            Screen::CourseCatalog(vm) => write_catalog(f, vm),
            Screen::MentorRoster(vm) => write_roster(f, vm),
            Screen::Mentorship(vm) => write_mentorship(f, vm),
            Screen::StudentDetail(vm) => write_student_detail(f, vm),
        }
    }
}

fn write_workspace(f: &mut impl Write, vm: &StudentWorkspaceVm) -> fmt::Result {
    writeln!(f, "Personal Workspace: {}", vm.student_name)?;
    writeln!(
        f,
        "Average mastery {}% | {} min logged ({}h)",
        vm.average_mastery, vm.total_minutes, vm.total_hours
    )?;

    match &vm.active {
        Some(active) => {
            writeln!(f)?;
            writeln!(f, "Active focus: {} ({}%)", active.title, active.mastery)?;
            writeln!(
                f,
                "  module {} of {}, {} remaining, {} logged, last opened {}",
                active.next_module,
                active.total_lessons,
                active.remaining_lessons,
                active.time_logged,
                active.last_accessed
            )?;
        }
        None => writeln!(f, "No enrolled courses yet.")?,
    }

    if !vm.courses.is_empty() {
        writeln!(f)?;
        writeln!(f, "Courses:")?;
        for course in &vm.courses {
            writeln!(
                f,
                "  [{}] {} ({}) {}% {}",
                course.id, course.title, course.category, course.mastery, course.lessons_label
            )?;
        }
    }

    if !vm.trend.is_empty() {
        writeln!(f)?;
        writeln!(f, "Daily focus:")?;
        for point in &vm.trend {
            writeln!(f, "  {} {:>4} min  {}", point.weekday, point.minutes, point.lesson)?;
        }
    }
    Ok(())
}

fn write_catalog(f: &mut impl Write, vm: &CourseCatalogVm) -> fmt::Result {
    writeln!(f, "Curriculum Explorer")?;
    let filters: Vec<String> = vm
        .filters
        .iter()
        .map(|name| {
            if *name == vm.selected_filter {
                format!("[{name}]")
            } else {
                name.clone()
            }
        })
        .collect();
    writeln!(f, "Filter: {}", filters.join(" "))?;

    if vm.courses.is_empty() {
        return writeln!(f, "No courses match this filter.");
    }
    for course in &vm.courses {
        writeln!(
            f,
            "  [{}] {} | {} | {} | {}% ({}/{})",
            course.id,
            course.title,
            course.category,
            course.owner_name,
            course.mastery,
            course.completed_lessons,
            course.total_lessons
        )?;
    }
    Ok(())
}

fn write_roster(f: &mut impl Write, vm: &MentorRosterVm) -> fmt::Result {
    writeln!(f, "Class Overview (average mastery {}%)", vm.class_average)?;
    writeln!(f)?;
    writeln!(f, "By category:")?;
    for category in &vm.categories {
        writeln!(
            f,
            "  {}: {}% across {} enrollment(s)",
            category.name,
            category.average_mastery,
            category.student_count()
        )?;
        for enrolled in &category.enrolled {
            writeln!(f, "    - {} {}%", enrolled.student_name, enrolled.mastery)?;
        }
    }
    writeln!(f)?;
    writeln!(f, "Students:")?;
    for row in &vm.students {
        writeln!(
            f,
            "  {} <{}>: {} course(s), {}% mastery, {} lessons done, {} focus",
            row.name,
            row.email,
            row.course_count,
            row.average_mastery,
            row.completed_lessons,
            row.focus_time
        )?;
    }
    Ok(())
}

fn write_mentorship(f: &mut impl Write, vm: &MentorshipVm) -> fmt::Result {
    writeln!(f, "Mentorship ({} need attention)", vm.needing_attention())?;
    for row in &vm.rows {
        write!(
            f,
            "  {:<20} {:>3}%  {}",
            row.name,
            row.global_mastery,
            row.status.as_str()
        )?;
        match &row.reason {
            Some(reason) => writeln!(f, "  {reason}")?,
            None => writeln!(f)?,
        }
    }
    Ok(())
}

fn write_student_detail(f: &mut impl Write, vm: &StudentDetailVm) -> fmt::Result {
    let student = &vm.student;
    writeln!(f, "{} <{}>", student.name, student.email)?;
    writeln!(
        f,
        "{}% average mastery | {}h total | {} lessons done",
        student.average_mastery, vm.total_hours, student.completed_lessons
    )?;
    writeln!(f)?;
    if vm.courses.is_empty() {
        return writeln!(f, "Not enrolled in any course.");
    }
    writeln!(f, "Courses:")?;
    for course in &vm.courses {
        writeln!(
            f,
            "  [{}] {} ({}) {}% {}",
            course.id, course.title, course.category, course.mastery, course.lessons_label
        )?;
    }
    Ok(())
}
