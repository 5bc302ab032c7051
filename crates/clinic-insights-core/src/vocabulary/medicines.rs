//! Medicine vocabulary.

/// Brand token (lower-case, single word) → generic name.
pub static BRAND_TO_GENERIC: &[(&str, &str)] = &[
    // Paracetamol
    ("crocin", "Paracetamol"),
    ("dolo", "Paracetamol"),
    ("calpol", "Paracetamol"),
    ("metacin", "Paracetamol"),
    ("tylenol", "Paracetamol"),
    // Ibuprofen
    ("brufen", "Ibuprofen"),
    ("combiflam", "Ibuprofen + Paracetamol"),
    ("advil", "Ibuprofen"),
    // Antibiotics
    ("augmentin", "Amoxicillin + Clavulanic Acid"),
    ("azithral", "Azithromycin"),
    ("zithromax", "Azithromycin"),
    ("ciprofloxacin", "Ciprofloxacin"),
    // Antacids
    ("gelusil", "Antacid"),
    ("digene", "Antacid"),
    ("eno", "Antacid"),
    ("pantoprazole", "Pantoprazole"),
    ("omeprazole", "Omeprazole"),
    // Cough syrups
    ("benadryl", "Diphenhydramine"),
    ("corex", "Cough Syrup"),
    ("ascoril", "Cough Syrup"),
    // Others
    ("aspirin", "Aspirin"),
    ("disprin", "Aspirin"),
    ("metformin", "Metformin"),
    ("glycomet", "Metformin"),
    ("amlodipine", "Amlodipine"),
    ("norvasc", "Amlodipine"),
];

/// Medicines offered by prescription autocomplete.
pub static COMMON_MEDICINES: &[&str] = &[
    // Clinic house brands
    "Prixicam",
    "Becocnx 60K",
    "Becoprx 60K",
    "Escnx LS 5",
    "CNXCLAV",
    "Betagold 24",
    "Bycine CD3",
    "Becocnx OD",
    "Becoprx OD",
    "Gdmin D",
    "Biluracise M",
    // Generics with dosage
    "Paracetamol 500mg",
    "Paracetamol 650mg",
    "Ibuprofen 400mg",
    "Ibuprofen 600mg",
    "Amoxicillin 500mg",
    "Azithromycin 500mg",
    "Ciprofloxacin 500mg",
    "Metformin 500mg",
    "Metformin 850mg",
    "Amlodipine 5mg",
    "Amlodipine 10mg",
    "Aspirin 75mg",
    "Aspirin 150mg",
    "Atorvastatin 10mg",
    "Atorvastatin 20mg",
    "Pantoprazole 40mg",
    "Omeprazole 20mg",
    "Cetirizine 10mg",
    "Montelukast 10mg",
    "Levothyroxine 50mcg",
    "Levothyroxine 100mcg",
    "Cough Syrup 10ml TID",
    "Multivitamin 1 tab OD",
    "Vitamin D3 60000 IU",
    "Calcium 500mg",
    "Iron 100mg",
    "Folic Acid 5mg",
    "Ondansetron 4mg",
    "Domperidone 10mg",
    "Ranitidine 150mg",
    "Diclofenac 50mg",
    "Prednisolone 5mg",
    "Dexamethasone 4mg",
    "Salbutamol Inhaler",
    "Insulin Glargine",
    // Popular brands
    "Crocin 500mg",
    "Dolo 650mg",
    "Brufen 400mg",
    "Combiflam",
    "Augmentin 625mg",
    "Azee 500mg",
    "Montek LC",
    "Levocetrizine 5mg",
];
