use crate::scoring::QuestionnaireItem;
use crate::Instrument;

/// BDI-II: Beck Depression Inventory, Second Edition.
/// 21 items, each graded 0–3. Total 0–63.
pub struct Bdi2;

impl Instrument for Bdi2 {
    fn id(&self) -> &str {
        "bdi2"
    }

    fn name(&self) -> &str {
        "BDI-II"
    }

    fn items(&self) -> &[QuestionnaireItem] {
        &BDI2_ITEMS
    }
}

const fn item(name: &'static str, options: [&'static str; 4]) -> QuestionnaireItem {
    QuestionnaireItem { name, options }
}

pub static BDI2_ITEMS: [QuestionnaireItem; 21] = [
    item(
        "Sadness",
        [
            "I do not feel sad",
            "I feel sad",
            "I am sad all the time",
            "I am so sad or unhappy that I can't stand it",
        ],
    ),
    item(
        "Pessimism",
        [
            "I am not discouraged about my future",
            "I feel more discouraged about my future than I used to",
            "I do not expect things to work out for me",
            "I feel my future is hopeless",
        ],
    ),
    item(
        "Past failure",
        [
            "I do not feel like a failure",
            "I have failed more than I should have",
            "As I look back, I see a lot of failures",
            "I feel I am a complete failure",
        ],
    ),
    item(
        "Loss of pleasure",
        [
            "I get as much pleasure as I ever did from the things I enjoy",
            "I don't enjoy things as much as I used to",
            "I get very little pleasure from the things I used to enjoy",
            "I can't get any pleasure from the things I used to enjoy",
        ],
    ),
    item(
        "Guilty feelings",
        [
            "I don't feel particularly guilty",
            "I feel guilty over many things I have done or should have done",
            "I feel quite guilty most of the time",
            "I feel guilty all of the time",
        ],
    ),
    item(
        "Punishment feelings",
        [
            "I don't feel I am being punished",
            "I feel I may be punished",
            "I expect to be punished",
            "I feel I am being punished",
        ],
    ),
    item(
        "Self-dislike",
        [
            "I feel the same about myself as ever",
            "I have lost confidence in myself",
            "I am disappointed in myself",
            "I dislike myself",
        ],
    ),
    item(
        "Self-criticalness",
        [
            "I don't criticize or blame myself more than usual",
            "I am more critical of myself than I used to be",
            "I criticize myself for all of my faults",
            "I blame myself for everything bad that happens",
        ],
    ),
    item(
        "Suicidal thoughts",
        [
            "I don't have any thoughts of killing myself",
            "I have thoughts of killing myself, but I would not carry them out",
            "I would like to kill myself",
            "I would kill myself if I had the chance",
        ],
    ),
    item(
        "Crying",
        [
            "I don't cry anymore than I used to",
            "I cry more than I used to",
            "I cry over every little thing",
            "I feel like crying but I can't",
        ],
    ),
    item(
        "Agitation",
        [
            "I am no more restless or wound up than usual",
            "I feel more restless or wound up than usual",
            "I am so restless or agitated that it's hard to stay still",
            "I am so restless or agitated that I have to keep moving or doing something",
        ],
    ),
    item(
        "Loss of interest",
        [
            "I have not lost interest in other people or activities",
            "I am less interested in other people or things than before",
            "I have lost most of my interest in other people or things",
            "It's hard to get interested in anything",
        ],
    ),
    item(
        "Indecisiveness",
        [
            "I make decisions about as well as ever",
            "I find it more difficult to make decisions than usual",
            "I have much greater difficulty in making decisions",
            "I can't make decisions at all anymore",
        ],
    ),
    item(
        "Worthlessness",
        [
            "I do not feel I am worthless",
            "I don't consider myself as worthwhile and useful as I used to",
            "I feel more worthless as compared to others",
            "I feel utterly worthless",
        ],
    ),
    item(
        "Loss of energy",
        [
            "I have as much energy as ever",
            "I have less energy than I used to have",
            "I don't have enough energy to do very much",
            "I don't have enough energy to do anything",
        ],
    ),
    item(
        "Changes in sleeping pattern",
        [
            "I have not experienced any change in my sleeping pattern",
            "I sleep a little more or less than usual",
            "I sleep a lot more or less than usual",
            "I sleep most of the day or wake up early and can't get back to sleep",
        ],
    ),
    item(
        "Irritability",
        [
            "I am no more irritable than usual",
            "I am more irritable than usual",
            "I am much more irritable than usual",
            "I am irritable all the time",
        ],
    ),
    item(
        "Changes in appetite",
        [
            "I have not experienced any change in my appetite",
            "My appetite is somewhat less or greater than usual",
            "My appetite is much less or greater than before",
            "I have no appetite at all or I crave food all the time",
        ],
    ),
    item(
        "Concentration difficulty",
        [
            "I can concentrate as well as ever",
            "I can't concentrate as well as usual",
            "It's hard to keep my mind on anything for long",
            "I find I can't concentrate on anything",
        ],
    ),
    item(
        "Tiredness or fatigue",
        [
            "I am no more tired or fatigued than usual",
            "I get tired or fatigued more easily than usual",
            "I am too tired or fatigued to do a lot of the things I used to do",
            "I am too tired or fatigued to do most of the things I used to do",
        ],
    ),
    item(
        "Loss of interest in sex",
        [
            "I have not noticed any recent change in my interest in sex",
            "I am less interested in sex than I used to be",
            "I am much less interested in sex now",
            "I have lost interest in sex completely",
        ],
    ),
];
