//! Seed records loaded at startup.
//!
//! Fictional hospitals, doctors and appointments. Nothing here is ever
//! written back; every restart starts from this set again.

use crate::models::{
    Appointment, AppointmentStatus, Doctor, Hospital, Pricing, Review, Weekday,
};

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn review(id: &str, patient_name: &str, rating: u8, comment: &str, date: &str) -> Review {
    Review {
        id: id.into(),
        patient_name: patient_name.into(),
        rating,
        comment: comment.into(),
        date: date.into(),
    }
}

pub fn hospitals() -> Vec<Hospital> {
    vec![
        Hospital {
            id: "1".into(),
            name: "City General Hospital".into(),
            location: "123 Main Street".into(),
            city: "New York".into(),
            specializations: strings(&[
                "Cardiology",
                "Neurology",
                "Orthopedics",
                "Emergency Medicine",
            ]),
            rating: 4.5,
            total_beds: 500,
            available_beds: 45,
            image: Some("https://images.unsplash.com/photo-1519494026892-80bbd2d6fd0d?w=400".into()),
            phone: "(555) 123-4567".into(),
            email: "info@citygeneral.com".into(),
            website: Some("https://citygeneral.com".into()),
            description: "A leading healthcare institution providing comprehensive medical services with state-of-the-art facilities.".into(),
            accepted_insurance: strings(&["Blue Cross", "Aetna", "Medicare", "Medicaid"]),
            pricing: Pricing {
                consultation: 150,
                emergency: 500,
                surgery: 5000,
            },
            reviews: vec![
                review(
                    "1",
                    "Sarah Johnson",
                    5,
                    "Excellent care and professional staff. Highly recommended!",
                    "2024-01-15",
                ),
                review(
                    "2",
                    "Mike Chen",
                    4,
                    "Good facilities but wait times could be better.",
                    "2024-01-10",
                ),
            ],
        },
        Hospital {
            id: "2".into(),
            name: "St. Mary Medical Center".into(),
            location: "456 Oak Avenue".into(),
            city: "Los Angeles".into(),
            specializations: strings(&[
                "Pediatrics",
                "Oncology",
                "Psychiatry",
                "Internal Medicine",
            ]),
            rating: 4.3,
            total_beds: 350,
            available_beds: 28,
            image: Some("https://images.unsplash.com/photo-1538108149393-fbbd81895907?w=400".into()),
            phone: "(555) 987-6543".into(),
            email: "contact@stmary.com".into(),
            website: None,
            description: "Compassionate healthcare with a focus on patient-centered care and innovative treatments.".into(),
            accepted_insurance: strings(&["Humana", "Cigna", "Medicare"]),
            pricing: Pricing {
                consultation: 175,
                emergency: 600,
                surgery: 6000,
            },
            reviews: vec![review(
                "3",
                "Emily Davis",
                5,
                "Outstanding pediatric care for my children.",
                "2024-01-12",
            )],
        },
        Hospital {
            id: "3".into(),
            name: "Metro Health Institute".into(),
            location: "789 Health Plaza".into(),
            city: "Chicago".into(),
            specializations: strings(&[
                "Dermatology",
                "Gastroenterology",
                "Radiology",
                "Surgery",
            ]),
            rating: 4.7,
            total_beds: 600,
            available_beds: 72,
            image: Some("https://images.unsplash.com/photo-1551076805-e1869033e561?w=400".into()),
            phone: "(555) 456-7890".into(),
            email: "info@metrohealth.com".into(),
            website: None,
            description: "Premier medical institution with cutting-edge technology and specialized care.".into(),
            accepted_insurance: strings(&["United Healthcare", "Blue Cross", "Aetna"]),
            pricing: Pricing {
                consultation: 200,
                emergency: 750,
                surgery: 7500,
            },
            reviews: vec![review(
                "4",
                "Robert Wilson",
                5,
                "Best medical facility in the city. Top-notch equipment.",
                "2024-01-08",
            )],
        },
    ]
}

pub fn doctors() -> Vec<Doctor> {
    use Weekday::*;

    vec![
        Doctor {
            id: "1".into(),
            name: "Dr. Sarah Williams".into(),
            specialization: "Cardiology".into(),
            hospital: "City General Hospital".into(),
            hospital_id: "1".into(),
            experience: 12,
            rating: 4.8,
            consultation_fee: 200,
            image: Some("https://images.unsplash.com/photo-1559839734-2b71ea197ec2?w=300".into()),
            availability: vec![Monday, Wednesday, Friday],
            education: "MD from Harvard Medical School".into(),
            languages: strings(&["English", "Spanish"]),
            description: "Specialized in interventional cardiology with extensive experience in heart surgeries.".into(),
        },
        Doctor {
            id: "2".into(),
            name: "Dr. Michael Chen".into(),
            specialization: "Neurology".into(),
            hospital: "City General Hospital".into(),
            hospital_id: "1".into(),
            experience: 15,
            rating: 4.9,
            consultation_fee: 250,
            image: Some("https://images.unsplash.com/photo-1612349317150-e413f6a5b16d?w=300".into()),
            availability: vec![Tuesday, Thursday, Saturday],
            education: "MD from Johns Hopkins University".into(),
            languages: strings(&["English", "Mandarin"]),
            description: "Expert in neurological disorders and brain surgery with international recognition.".into(),
        },
        Doctor {
            id: "3".into(),
            name: "Dr. Jennifer Rodriguez".into(),
            specialization: "Pediatrics".into(),
            hospital: "St. Mary Medical Center".into(),
            hospital_id: "2".into(),
            experience: 8,
            rating: 4.7,
            consultation_fee: 150,
            image: Some("https://images.unsplash.com/photo-1582750433449-648ed127bb54?w=300".into()),
            availability: vec![Monday, Tuesday, Thursday, Friday],
            education: "MD from UCLA Medical School".into(),
            languages: strings(&["English", "Spanish"]),
            description: "Passionate about children's health with specialization in developmental pediatrics.".into(),
        },
    ]
}

pub fn appointments() -> Vec<Appointment> {
    vec![
        Appointment {
            id: "1".into(),
            doctor_id: "1".into(),
            doctor_name: "Dr. Sarah Williams".into(),
            hospital_name: "City General Hospital".into(),
            date: "2024-02-15".into(),
            time: "10:00 AM".into(),
            status: AppointmentStatus::Upcoming,
            reason: "Regular Checkup".into(),
            fees: 200,
        },
        Appointment {
            id: "2".into(),
            doctor_id: "2".into(),
            doctor_name: "Dr. Michael Chen".into(),
            hospital_name: "City General Hospital".into(),
            date: "2024-01-20".into(),
            time: "2:00 PM".into(),
            status: AppointmentStatus::Completed,
            reason: "Headache Consultation".into(),
            fees: 250,
        },
    ]
}
