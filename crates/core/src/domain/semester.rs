use super::grade::Grade;

/// A single class within a semester with its earned/total points
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassRecord {
    pub name: String,
    pub earned: i64,
    pub total: i64,
}

impl ClassRecord {
    pub fn new(name: impl Into<String>, earned: i64, total: i64) -> Self {
        Self {
            name: name.into(),
            earned,
            total,
        }
    }

    pub fn grade(&self) -> Grade {
        Grade::from_points(self.earned, self.total)
    }
}

impl std::fmt::Display for ClassRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}/{}", self.name, self.earned, self.total)
    }
}

/// A named collection of classes.
///
/// Class names are unique within a semester. Classes keep the order they were
/// first added in; overwriting a class keeps its original position.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Semester {
    pub name: String,
    classes: Vec<ClassRecord>,
}

impl Semester {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            classes: Vec::new(),
        }
    }

    /// Insert a class or overwrite the points of an existing one
    pub fn add_class(&mut self, name: impl Into<String>, earned: i64, total: i64) {
        let name = name.into();
        match self.classes.iter_mut().find(|c| c.name == name) {
            Some(existing) => {
                existing.earned = earned;
                existing.total = total;
            }
            None => self.classes.push(ClassRecord::new(name, earned, total)),
        }
    }

    /// Remove a class if present. Returns whether anything was removed.
    pub fn remove_class(&mut self, name: &str) -> bool {
        let before = self.classes.len();
        self.classes.retain(|c| c.name != name);
        self.classes.len() != before
    }

    pub fn class(&self, name: &str) -> Option<&ClassRecord> {
        self.classes.iter().find(|c| c.name == name)
    }

    pub fn classes(&self) -> &[ClassRecord] {
        &self.classes
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Upsert every record in order
    pub fn apply_classes<'a, I>(&mut self, records: I)
    where
        I: IntoIterator<Item = &'a ClassRecord>,
    {
        for record in records {
            self.add_class(record.name.clone(), record.earned, record.total);
        }
    }

    /// Letter grade for every class, in class order
    pub fn calculate_grades(&self) -> Vec<(String, Grade)> {
        self.classes
            .iter()
            .map(|c| (c.name.clone(), c.grade()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_semester_is_empty() {
        let semester = Semester::new("Fall Semester");
        assert_eq!(semester.name, "Fall Semester");
        assert!(semester.is_empty());
        assert!(semester.calculate_grades().is_empty());
    }

    #[test]
    fn test_add_class_overwrites_in_place() {
        let mut semester = Semester::new("Fall Semester");
        semester.add_class("Math", 80, 100);
        semester.add_class("History", 50, 60);
        semester.add_class("Math", 95, 100);

        let names: Vec<_> = semester.classes().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Math", "History"]);
        assert_eq!(semester.class("Math"), Some(&ClassRecord::new("Math", 95, 100)));
    }

    #[test]
    fn test_remove_class() {
        let mut semester = Semester::new("Spring Semester");
        semester.add_class("Art", 10, 10);

        assert!(!semester.remove_class("Music"));
        assert!(semester.remove_class("Art"));
        assert!(semester.is_empty());
    }

    #[test]
    fn test_class_names_are_case_sensitive() {
        let mut semester = Semester::new("Fall Semester");
        semester.add_class("math", 1, 2);
        semester.add_class("Math", 3, 4);
        assert_eq!(semester.classes().len(), 2);
    }

    #[test]
    fn test_calculate_grades() {
        let mut semester = Semester::new("Fall Semester");
        semester.add_class("Math", 95, 100);
        semester.add_class("Chemistry", 70, 100);
        semester.add_class("Gym", 0, 100);

        assert_eq!(
            semester.calculate_grades(),
            vec![
                ("Math".to_string(), Grade::A),
                ("Chemistry".to_string(), Grade::C),
                ("Gym".to_string(), Grade::F),
            ]
        );
    }

    #[test]
    fn test_apply_classes_upserts() {
        let mut semester = Semester::new("Fall Semester");
        semester.add_class("Math", 50, 100);

        let updates = vec![
            ClassRecord::new("Math", 90, 100),
            ClassRecord::new("Physics", 40, 50),
        ];
        semester.apply_classes(&updates);

        assert_eq!(semester.classes(), updates.as_slice());
    }

    #[test]
    fn test_class_record_display() {
        assert_eq!(ClassRecord::new("Math", 95, 100).to_string(), "Math: 95/100");
    }
}
